use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SqlTemplateError;

/// Quote character used for `?#` identifiers and `?a` keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// MySQL-style `` `name` ``.
    #[default]
    Backtick,
    /// ANSI-style `"name"` (PostgreSQL, SQLite).
    DoubleQuote,
}

impl QuoteStyle {
    #[must_use]
    pub fn quote_char(self) -> char {
        match self {
            QuoteStyle::Backtick => '`',
            QuoteStyle::DoubleQuote => '"',
        }
    }
}

/// Which conditional blocks a skip argument removes.
///
/// # Examples
/// ```rust
/// use sql_template::prelude::*;
///
/// let options = TemplateOptions::default().with_skip_scope(SkipScope::Global);
/// # let _ = options;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SkipScope {
    /// Remove only the block whose own placeholders are bound to a skip argument.
    #[default]
    Block,
    /// Remove every block as soon as any argument is a skip.
    Global,
}

/// What to do when the template has more placeholders than arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MissingArgs {
    /// Format the missing argument as `NULL`.
    #[default]
    Null,
    /// Fail with `SqlTemplateError::MissingArgument`.
    Error,
}

/// Per-templater options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    pub quote_style: QuoteStyle,
    pub skip_scope: SkipScope,
    pub missing_args: MissingArgs,
}

impl TemplateOptions {
    #[must_use]
    pub fn with_quote_style(mut self, quote_style: QuoteStyle) -> Self {
        self.quote_style = quote_style;
        self
    }

    #[must_use]
    pub fn with_skip_scope(mut self, skip_scope: SkipScope) -> Self {
        self.skip_scope = skip_scope;
        self
    }

    #[must_use]
    pub fn with_missing_args(mut self, missing_args: MissingArgs) -> Self {
        self.missing_args = missing_args;
        self
    }

    /// Load options from a JSON document; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `SqlTemplateError::ConfigError` if the document is not valid options JSON.
    pub fn from_json(json: &str) -> Result<Self, SqlTemplateError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_mysql_behaviour() {
        let opts = TemplateOptions::default();
        assert_eq!(opts.quote_style, QuoteStyle::Backtick);
        assert_eq!(opts.skip_scope, SkipScope::Block);
        assert_eq!(opts.missing_args, MissingArgs::Null);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let opts = TemplateOptions::from_json(r#"{"quote_style": "double_quote"}"#).unwrap();
        assert_eq!(opts.quote_style, QuoteStyle::DoubleQuote);
        assert_eq!(opts.skip_scope, SkipScope::Block);
    }

    #[test]
    fn bad_json_is_config_error() {
        let err = TemplateOptions::from_json(r#"{"skip_scope": "everywhere"}"#).unwrap_err();
        assert!(matches!(err, SqlTemplateError::ConfigError(_)));
    }

    #[test]
    fn value_enum_parses_cli_names() {
        assert_eq!(
            SkipScope::from_str("global", true).unwrap(),
            SkipScope::Global
        );
        assert_eq!(
            MissingArgs::from_str("error", true).unwrap(),
            MissingArgs::Error
        );
    }
}
