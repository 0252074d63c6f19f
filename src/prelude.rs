//! Convenient imports for common functionality.
//!
//! This module re-exports the types needed to build queries, so most callers only need
//! `use sql_template::prelude::*;`.

pub use crate::error::SqlTemplateError;
pub use crate::escape::{AnsiEscaper, MysqlEscaper, StringEscaper};
pub use crate::ident::{quote_identifier, unquote_identifier};
pub use crate::options::{MissingArgs, QuoteStyle, SkipScope, TemplateOptions};
pub use crate::template::{SqlTemplate, build_query};
pub use crate::types::{QueryValue, skip};

#[cfg(feature = "sqlite")]
pub use crate::escape::SqliteEscaper;
