//! SQL identifier quoting for `?#` placeholders and `?a` keys.
//!
//! A name is wrapped in the dialect's quote character and every quote character inside it is
//! doubled, so no name can close the quoting early.

use crate::error::SqlTemplateError;
use crate::options::QuoteStyle;
use crate::types::QueryValue;

/// Quote a single identifier.
///
/// ```rust
/// use sql_template::prelude::*;
///
/// assert_eq!(quote_identifier("user`s", QuoteStyle::Backtick), "`user``s`");
/// ```
#[must_use]
pub fn quote_identifier(name: &str, style: QuoteStyle) -> String {
    let q = style.quote_char();
    let mut out = String::with_capacity(name.len() + 2);
    out.push(q);
    for ch in name.chars() {
        if ch == q {
            out.push(q);
        }
        out.push(ch);
    }
    out.push(q);
    out
}

/// Reverse [`quote_identifier`]. Returns `None` when `quoted` is not a well-formed quoted name.
#[must_use]
pub fn unquote_identifier(quoted: &str, style: QuoteStyle) -> Option<String> {
    let q = style.quote_char();
    let inner = quoted.strip_prefix(q)?.strip_suffix(q)?;

    let mut name = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == q {
            // a lone quote inside would have terminated the identifier
            if chars.next() != Some(q) {
                return None;
            }
        }
        name.push(ch);
    }
    Some(name)
}

/// Format the argument of a `?#` placeholder: one name, or a list of names joined with `, `.
///
/// # Errors
///
/// Returns `SqlTemplateError::ExpectedArray` for anything other than text or a list of text.
pub fn format_identifiers(value: &QueryValue, style: QuoteStyle) -> Result<String, SqlTemplateError> {
    match value {
        QueryValue::Text(name) => Ok(quote_identifier(name, style)),
        QueryValue::List(names) => {
            let mut quoted = Vec::with_capacity(names.len());
            for name in names {
                let Some(name) = name.as_text() else {
                    return Err(SqlTemplateError::ExpectedArray(format!(
                        "identifier list entries must be text, got {}",
                        name.kind()
                    )));
                };
                quoted.push(quote_identifier(name, style));
            }
            Ok(quoted.join(", "))
        }
        other => Err(SqlTemplateError::ExpectedArray(format!(
            "identifier placeholder needs text or a list of text, got {}",
            other.kind()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_plain_and_hostile_names() {
        assert_eq!(quote_identifier("name", QuoteStyle::Backtick), "`name`");
        assert_eq!(
            quote_identifier("a` OR 1=1 -- ", QuoteStyle::Backtick),
            "`a`` OR 1=1 -- `"
        );
        assert_eq!(quote_identifier("a\"b", QuoteStyle::DoubleQuote), "\"a\"\"b\"");
        assert_eq!(quote_identifier("a\"b", QuoteStyle::Backtick), "`a\"b`");
    }

    #[test]
    fn round_trips_every_name() {
        let names = ["", "id", "`", "``", "a`b`c", "`lead", "trail`", "ünïcödé", "\"x\""];
        for style in [QuoteStyle::Backtick, QuoteStyle::DoubleQuote] {
            for name in names {
                let quoted = quote_identifier(name, style);
                assert_eq!(unquote_identifier(&quoted, style).as_deref(), Some(name));
            }
        }
    }

    #[test]
    fn rejects_malformed_quoted_names() {
        assert_eq!(unquote_identifier("name", QuoteStyle::Backtick), None);
        assert_eq!(unquote_identifier("`a`b`", QuoteStyle::Backtick), None);
        assert_eq!(unquote_identifier("`", QuoteStyle::Backtick), None);
    }

    #[test]
    fn formats_single_and_list() {
        let style = QuoteStyle::Backtick;
        assert_eq!(
            format_identifiers(&QueryValue::from("name"), style).unwrap(),
            "`name`"
        );
        assert_eq!(
            format_identifiers(&QueryValue::from(vec!["a", "b"]), style).unwrap(),
            "`a`, `b`"
        );
    }

    #[test]
    fn non_text_identifiers_fail() {
        let style = QuoteStyle::Backtick;
        assert!(matches!(
            format_identifiers(&QueryValue::Int(1), style),
            Err(SqlTemplateError::ExpectedArray(_))
        ));
        assert!(matches!(
            format_identifiers(&QueryValue::from(vec![1_i64]), style),
            Err(SqlTemplateError::ExpectedArray(_))
        ));
    }
}
