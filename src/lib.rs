//! Typed-placeholder SQL templating.
//!
//! A template such as `SELECT ?# FROM users WHERE id = ?d{ AND block = ?d}` plus an ordered
//! argument list becomes finished SQL text. String escaping is delegated to a
//! [`StringEscaper`], so the same templates work against MySQL-style backslash escaping,
//! standard SQL quoting, or a live SQLite connection.

pub mod prelude;

pub mod error;
pub mod escape;
pub mod format;
pub mod ident;
pub mod options;
pub mod template;
pub mod types;

pub use error::SqlTemplateError;
pub use escape::{AnsiEscaper, MysqlEscaper, StringEscaper, quote_string};
#[cfg(feature = "sqlite")]
pub use escape::SqliteEscaper;
pub use ident::{format_identifiers, quote_identifier, unquote_identifier};
pub use options::{MissingArgs, QuoteStyle, SkipScope, TemplateOptions};
pub use template::{SqlTemplate, build_query, count_placeholders};
pub use types::{QueryValue, skip};
