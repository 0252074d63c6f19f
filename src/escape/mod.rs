//! String-literal escaping.
//!
//! Escaping rules depend on the server and its session charset, so the templater only asks a
//! [`StringEscaper`] for the escaped body and adds the surrounding single quotes itself.

use std::sync::Arc;

use crate::error::SqlTemplateError;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteEscaper;

/// Escape the body of a single-quoted SQL string literal.
pub trait StringEscaper {
    /// Return `raw` escaped for inclusion between single quotes.
    ///
    /// # Errors
    ///
    /// Returns `SqlTemplateError` if the backing connection cannot escape the value.
    fn escape_string(&self, raw: &str) -> Result<String, SqlTemplateError>;
}

impl<E: StringEscaper + ?Sized> StringEscaper for &E {
    fn escape_string(&self, raw: &str) -> Result<String, SqlTemplateError> {
        (**self).escape_string(raw)
    }
}

impl<E: StringEscaper + ?Sized> StringEscaper for Box<E> {
    fn escape_string(&self, raw: &str) -> Result<String, SqlTemplateError> {
        (**self).escape_string(raw)
    }
}

impl<E: StringEscaper + ?Sized> StringEscaper for Arc<E> {
    fn escape_string(&self, raw: &str) -> Result<String, SqlTemplateError> {
        (**self).escape_string(raw)
    }
}

/// Backslash escaping as done by the MySQL client library for single-byte-safe charsets.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlEscaper;

impl StringEscaper for MysqlEscaper {
    fn escape_string(&self, raw: &str) -> Result<String, SqlTemplateError> {
        let mut out = String::with_capacity(raw.len() + 8);
        for ch in raw.chars() {
            match ch {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                _ => out.push(ch),
            }
        }
        Ok(out)
    }
}

/// Standard SQL escaping: single quotes are doubled, nothing else changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiEscaper;

impl StringEscaper for AnsiEscaper {
    fn escape_string(&self, raw: &str) -> Result<String, SqlTemplateError> {
        Ok(raw.replace('\'', "''"))
    }
}

/// Escape `raw` with `escaper` and wrap it in single quotes.
///
/// # Errors
///
/// Propagates the escaper's error.
pub fn quote_string<E: StringEscaper + ?Sized>(
    escaper: &E,
    raw: &str,
) -> Result<String, SqlTemplateError> {
    let escaped = escaper.escape_string(raw)?;
    let mut out = String::with_capacity(escaped.len() + 2);
    out.push('\'');
    out.push_str(&escaped);
    out.push('\'');
    Ok(out)
}
