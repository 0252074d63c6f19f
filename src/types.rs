use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Values bound to template placeholders.
///
/// Every argument kind the formatter understands is a variant here, so dispatch in
/// [`crate::format`] is an exhaustive match rather than a runtime type check:
/// ```rust
/// use sql_template::prelude::*;
///
/// let args = vec![
///     QueryValue::Int(1),
///     QueryValue::Text("alice".into()),
///     QueryValue::from(vec!["id", "name"]),
///     skip(),
/// ];
/// # let _ = args;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// NULL value
    Null,
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Boolean value, rendered as `1`/`0`
    Bool(bool),
    /// Text/string value
    Text(String),
    /// Timestamp value, rendered as a quoted literal
    Timestamp(NaiveDateTime),
    /// Unkeyed sequence of values
    List(Vec<QueryValue>),
    /// Keyed entries in insertion order
    Map(Vec<(String, QueryValue)>),
    /// Marker that omits the conditional block holding the placeholder it is bound to
    Skip,
}

/// Return the skip marker.
///
/// Passing it in place of an argument omits the `{...}` block containing the matching
/// placeholder.
#[must_use]
pub fn skip() -> QueryValue {
    QueryValue::Skip
}

impl QueryValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let QueryValue::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let QueryValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let QueryValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            QueryValue::Null => "null",
            QueryValue::Int(_) => "integer",
            QueryValue::Float(_) => "float",
            QueryValue::Bool(_) => "boolean",
            QueryValue::Text(_) => "text",
            QueryValue::Timestamp(_) => "timestamp",
            QueryValue::List(_) => "list",
            QueryValue::Map(_) => "map",
            QueryValue::Skip => "skip",
        }
    }

    /// Build a keyed value from `(key, value)` pairs, keeping their order.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<QueryValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        QueryValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<NaiveDateTime> for QueryValue {
    fn from(value: NaiveDateTime) -> Self {
        QueryValue::Timestamp(value)
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Null, Into::into)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        QueryValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<JsonValue> for QueryValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => QueryValue::Null,
            JsonValue::Bool(b) => QueryValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => QueryValue::Int(i),
                // u64 beyond i64::MAX and real numbers both land here
                None => QueryValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => QueryValue::Text(s),
            JsonValue::Array(items) => {
                QueryValue::List(items.into_iter().map(QueryValue::from).collect())
            }
            JsonValue::Object(obj) => QueryValue::Map(
                obj.into_iter()
                    .map(|(k, v)| (k, QueryValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_object_keeps_insertion_order() {
        let value = QueryValue::from(json!({"b": 1, "a": "x"}));
        assert_eq!(
            value,
            QueryValue::Map(vec![
                ("b".to_string(), QueryValue::Int(1)),
                ("a".to_string(), QueryValue::Text("x".into())),
            ])
        );
    }

    #[test]
    fn json_numbers_split_into_int_and_float() {
        assert_eq!(QueryValue::from(json!(7)), QueryValue::Int(7));
        assert_eq!(QueryValue::from(json!(2.5)), QueryValue::Float(2.5));
        assert_eq!(QueryValue::from(json!(null)), QueryValue::Null);
    }

    #[test]
    fn option_and_vec_conversions() {
        assert_eq!(QueryValue::from(None::<i64>), QueryValue::Null);
        assert_eq!(QueryValue::from(Some("a")), QueryValue::Text("a".into()));
        assert_eq!(
            QueryValue::from(vec![1_i64, 2]),
            QueryValue::List(vec![QueryValue::Int(1), QueryValue::Int(2)])
        );
    }

    #[test]
    fn skip_is_distinct_from_null() {
        assert_ne!(skip(), QueryValue::Null);
        assert!(skip().is_skip());
        assert!(!QueryValue::Null.is_skip());
    }
}
