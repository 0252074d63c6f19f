//! Rendering of single arguments as SQL text.
//!
//! Each placeholder specifier has its own rule; [`format_placeholder`] picks one.

use crate::error::SqlTemplateError;
use crate::escape::{StringEscaper, quote_string};
use crate::ident::{format_identifiers, quote_identifier};
use crate::options::QuoteStyle;
use crate::types::QueryValue;

const NULL: &str = "NULL";

/// The letter following `?` in a placeholder token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specifier {
    /// `?`: generic value
    Value,
    /// `?d`: integer
    Int,
    /// `?f`: float
    Float,
    /// `?a`: value list or `key = value` list
    Array,
    /// `?#`: identifier or identifier list
    Ident,
}

impl Specifier {
    #[must_use]
    pub fn from_suffix(suffix: Option<&str>) -> Option<Self> {
        match suffix {
            None | Some("") => Some(Specifier::Value),
            Some("d") => Some(Specifier::Int),
            Some("f") => Some(Specifier::Float),
            Some("a") => Some(Specifier::Array),
            Some("#") => Some(Specifier::Ident),
            Some(_) => None,
        }
    }
}

/// Dispatch `value` to the formatter for `spec`.
///
/// # Errors
///
/// Returns the error of the selected formatter.
pub fn format_placeholder<E: StringEscaper + ?Sized>(
    spec: Specifier,
    value: &QueryValue,
    escaper: &E,
    style: QuoteStyle,
) -> Result<String, SqlTemplateError> {
    match spec {
        Specifier::Value => format_value(value, escaper),
        Specifier::Int => format_integer(value),
        Specifier::Float => format_float(value),
        Specifier::Array => format_array(value, escaper, style),
        Specifier::Ident => format_identifiers(value, style),
    }
}

/// Generic `?` rule: scalars only, strings quoted through `escaper`.
///
/// # Errors
///
/// `UnsupportedValueType` for lists, maps and the skip marker, `NonFiniteFloat` for
/// NaN/infinity, or the escaper's error.
pub fn format_value<E: StringEscaper + ?Sized>(
    value: &QueryValue,
    escaper: &E,
) -> Result<String, SqlTemplateError> {
    match value {
        QueryValue::Null => Ok(NULL.to_string()),
        QueryValue::Int(i) => Ok(i.to_string()),
        QueryValue::Float(f) => float_literal(*f),
        QueryValue::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
        QueryValue::Text(s) => quote_string(escaper, s),
        QueryValue::Timestamp(dt) => quote_string(escaper, &dt.format("%F %T%.f").to_string()),
        QueryValue::List(_) | QueryValue::Map(_) | QueryValue::Skip => Err(
            SqlTemplateError::UnsupportedValueType(format!(
                "{} cannot be used as a scalar value",
                value.kind()
            )),
        ),
    }
}

/// `?d` rule: coerce to a signed 64-bit integer.
///
/// # Errors
///
/// `UnsupportedValueType` for lists, maps, timestamps and the skip marker.
pub fn format_integer(value: &QueryValue) -> Result<String, SqlTemplateError> {
    let i = match value {
        QueryValue::Null => return Ok(NULL.to_string()),
        QueryValue::Int(i) => *i,
        // `as` truncates toward zero, saturates out of range and maps NaN to 0
        QueryValue::Float(f) => *f as i64,
        QueryValue::Bool(b) => i64::from(*b),
        QueryValue::Text(s) => text_to_int(s),
        other => {
            return Err(SqlTemplateError::UnsupportedValueType(format!(
                "{} cannot be coerced to an integer",
                other.kind()
            )));
        }
    };
    Ok(i.to_string())
}

/// `?f` rule: coerce to a 64-bit float.
///
/// The text is Rust's shortest round-trip decimal form, never exponent notation: `1e20`
/// renders as `100000000000000000000` and `0.1 + 0.2` as `0.30000000000000004`.
///
/// # Errors
///
/// `UnsupportedValueType` for lists, maps, timestamps and the skip marker; `NonFiniteFloat`
/// when the result is NaN or infinite.
pub fn format_float(value: &QueryValue) -> Result<String, SqlTemplateError> {
    let f = match value {
        QueryValue::Null => return Ok(NULL.to_string()),
        QueryValue::Int(i) => *i as f64,
        QueryValue::Float(f) => *f,
        QueryValue::Bool(b) => f64::from(u8::from(*b)),
        QueryValue::Text(s) => text_to_float(s),
        other => {
            return Err(SqlTemplateError::UnsupportedValueType(format!(
                "{} cannot be coerced to a float",
                other.kind()
            )));
        }
    };
    float_literal(f)
}

/// `?a` rule: `v1, v2` for lists, `` `k1` = v1, `k2` = v2 `` for maps.
///
/// Map keys that are canonical integers (`"0"`, `"-3"`) count as positions and render only the
/// value.
///
/// # Errors
///
/// `ExpectedArray` if `value` is neither a list nor a map, otherwise any [`format_value`] error
/// raised by an entry.
pub fn format_array<E: StringEscaper + ?Sized>(
    value: &QueryValue,
    escaper: &E,
    style: QuoteStyle,
) -> Result<String, SqlTemplateError> {
    let parts = match value {
        QueryValue::List(items) => items
            .iter()
            .map(|item| format_value(item, escaper))
            .collect::<Result<Vec<_>, _>>()?,
        QueryValue::Map(entries) => {
            let mut parts = Vec::with_capacity(entries.len());
            for (key, item) in entries {
                let formatted = format_value(item, escaper)?;
                if is_positional_key(key) {
                    parts.push(formatted);
                } else {
                    parts.push(format!("{} = {formatted}", quote_identifier(key, style)));
                }
            }
            parts
        }
        other => {
            return Err(SqlTemplateError::ExpectedArray(format!(
                "array placeholder needs a list or map, got {}",
                other.kind()
            )));
        }
    };
    Ok(parts.join(", "))
}

fn float_literal(f: f64) -> Result<String, SqlTemplateError> {
    if f.is_finite() {
        Ok(f.to_string())
    } else {
        Err(SqlTemplateError::NonFiniteFloat(f))
    }
}

/// Decimal integer without sign prefix `+`, leading zeros or `-0`.
fn is_positional_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if digits.starts_with('0') && (digits.len() > 1 || key.starts_with('-')) {
        return false;
    }
    key.parse::<i64>().is_ok()
}

/// Leading numeric part of `s` (after whitespace), and whether it has a fraction or exponent.
fn numeric_prefix(s: &str) -> (&str, bool) {
    let s = s.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let bytes = s.as_bytes();
    let mut idx = 0;
    let mut is_real = false;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        idx += 1;
    }
    let int_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    let mut mantissa_digits = idx - int_start;

    if bytes.get(idx) == Some(&b'.') {
        let frac_start = idx + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if mantissa_digits > 0 || end > frac_start {
            mantissa_digits += end - frac_start;
            idx = end;
            is_real = true;
        }
    }
    if mantissa_digits == 0 {
        return ("", false);
    }

    if matches!(bytes.get(idx), Some(b'e' | b'E')) {
        let mut end = idx + 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let exp_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > exp_start {
            idx = end;
            is_real = true;
        }
    }

    (&s[..idx], is_real)
}

fn text_to_int(s: &str) -> i64 {
    match numeric_prefix(s) {
        ("", _) => 0,
        (prefix, true) => prefix.parse::<f64>().map_or(0, |f| f as i64),
        (prefix, false) => prefix.parse::<i64>().unwrap_or_else(|_| {
            if prefix.starts_with('-') {
                i64::MIN
            } else {
                i64::MAX
            }
        }),
    }
}

fn text_to_float(s: &str) -> f64 {
    match numeric_prefix(s) {
        ("", _) => 0.0,
        (prefix, _) => prefix.parse::<f64>().unwrap_or(0.0),
    }
}
