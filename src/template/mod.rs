//! Query building: conditional blocks first, then placeholder substitution.

use lazy_static::lazy_static;
use tracing::debug;

mod blocks;
mod placeholders;

pub use placeholders::count_placeholders;

use crate::error::SqlTemplateError;
use crate::escape::StringEscaper;
use crate::format::{Specifier, format_placeholder};
use crate::options::{MissingArgs, SkipScope, TemplateOptions};
use crate::types::{self, QueryValue};
use blocks::resolve_blocks;
use placeholders::PLACEHOLDER_RE;

static NULL_VALUE: QueryValue = QueryValue::Null;

lazy_static! {
    /// Text the skip marker formats as when it lands on a kept placeholder under
    /// `SkipScope::Global`.
    static ref LEGACY_SKIP: QueryValue = QueryValue::Text("__SKIP__".to_string());
}

/// Builds SQL text from templates with typed placeholders.
///
/// Placeholders: `?` (any scalar), `?d` (integer), `?f` (float), `?a` (value list or
/// `key = value` list), `?#` (identifier or identifier list). A `{...}` block is dropped when
/// one of its placeholders is bound to [`skip`](SqlTemplate::skip), and unwrapped otherwise.
///
/// # Examples
/// ```rust
/// use sql_template::prelude::*;
///
/// let tpl = SqlTemplate::new(MysqlEscaper);
/// let sql = tpl.build_query(
///     "SELECT ?# FROM users WHERE name = ?{ AND block = ?d}",
///     &[QueryValue::from(vec!["id", "name"]), "Jack".into(), tpl.skip()],
/// )?;
/// assert_eq!(sql, "SELECT `id`, `name` FROM users WHERE name = 'Jack'");
/// # Ok::<(), SqlTemplateError>(())
/// ```
pub struct SqlTemplate<E> {
    escaper: E,
    options: TemplateOptions,
}

impl<E: StringEscaper> SqlTemplate<E> {
    #[must_use]
    pub fn new(escaper: E) -> Self {
        Self {
            escaper,
            options: TemplateOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: TemplateOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn options(&self) -> TemplateOptions {
        self.options
    }

    #[must_use]
    pub fn escaper(&self) -> &E {
        &self.escaper
    }

    /// The marker that omits the conditional block it is bound to.
    #[must_use]
    pub fn skip(&self) -> QueryValue {
        types::skip()
    }

    /// Substitute `args` into `template`.
    ///
    /// Missing arguments format as `NULL` unless the options ask for an error; surplus
    /// arguments are ignored.
    ///
    /// # Errors
    ///
    /// Returns `SqlTemplateError` when an argument does not fit its placeholder, when a skip
    /// marker is bound outside a conditional block, when arguments are missing under
    /// `MissingArgs::Error`, or when the escaper fails. Nothing is returned on error.
    pub fn build_query(
        &self,
        template: &str,
        args: &[QueryValue],
    ) -> Result<String, SqlTemplateError> {
        let resolved = resolve_blocks(template, args, self.options.skip_scope);
        let sql = resolved.sql.as_ref();

        let placeholders = count_placeholders(sql);
        let supplied = resolved.args.len();
        if placeholders > supplied {
            if self.options.missing_args == MissingArgs::Error {
                return Err(SqlTemplateError::MissingArgument {
                    index: supplied,
                    placeholders,
                    supplied,
                });
            }
            debug!(placeholders, supplied, "binding NULL to missing arguments");
        } else if supplied > placeholders {
            debug!(placeholders, supplied, "ignoring surplus arguments");
        }

        let mut out = String::with_capacity(sql.len() + supplied * 8);
        let mut last = 0;
        for (index, token) in PLACEHOLDER_RE.find_iter(sql).enumerate() {
            out.push_str(&sql[last..token.start()]);

            let mut value = resolved.args.get(index).copied().unwrap_or(&NULL_VALUE);
            if value.is_skip() {
                match self.options.skip_scope {
                    SkipScope::Block => return Err(SqlTemplateError::MisplacedSkip { index }),
                    // the whole-list rule binds the marker like any other argument
                    SkipScope::Global => value = &*LEGACY_SKIP,
                }
            }
            let spec =
                Specifier::from_suffix(token.as_str().strip_prefix('?')).unwrap_or(Specifier::Value);
            out.push_str(&format_placeholder(
                spec,
                value,
                &self.escaper,
                self.options.quote_style,
            )?);

            last = token.end();
        }
        out.push_str(&sql[last..]);

        Ok(out)
    }
}

/// Build `template` with default options.
///
/// # Errors
///
/// See [`SqlTemplate::build_query`].
pub fn build_query<E: StringEscaper>(
    escaper: &E,
    template: &str,
    args: &[QueryValue],
) -> Result<String, SqlTemplateError> {
    SqlTemplate::new(escaper).build_query(template, args)
}
