use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlTemplateError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Unsupported value type: {0}")]
    UnsupportedValueType(String),

    #[error("Expected an array: {0}")]
    ExpectedArray(String),

    #[error("Missing argument {index}: template has {placeholders} placeholders, {supplied} supplied")]
    MissingArgument {
        index: usize,
        placeholders: usize,
        supplied: usize,
    },

    #[error("Skip value bound to placeholder {index}, which is not inside a conditional block")]
    MisplacedSkip { index: usize },

    #[error("Non-finite float cannot be written as SQL: {0}")]
    NonFiniteFloat(f64),

    #[error("Escape error: {0}")]
    EscapeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for SqlTemplateError {
    fn from(err: serde_json::Error) -> Self {
        SqlTemplateError::ConfigError(err.to_string())
    }
}
