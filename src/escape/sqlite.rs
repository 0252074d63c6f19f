use rusqlite::Connection;

use super::StringEscaper;
use crate::error::SqlTemplateError;

/// Escaper backed by a live SQLite connection.
///
/// Uses SQLite's own `quote()` function, so the result always matches what the engine will
/// parse. `rusqlite::Connection` is not `Sync`; share it per thread, not across threads.
pub struct SqliteEscaper {
    conn: Connection,
}

impl SqliteEscaper {
    #[must_use]
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open a private in-memory connection used only for escaping.
    ///
    /// # Errors
    ///
    /// Returns `SqlTemplateError::SqliteError` if SQLite cannot open the database.
    pub fn in_memory() -> Result<Self, SqlTemplateError> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    /// Borrow the underlying connection.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Give the connection back.
    #[must_use]
    pub fn into_inner(self) -> Connection {
        self.conn
    }
}

impl StringEscaper for SqliteEscaper {
    fn escape_string(&self, raw: &str) -> Result<String, SqlTemplateError> {
        let quoted: String = self
            .conn
            .query_row("SELECT quote(?1)", [raw], |row| row.get(0))?;
        // quote() returns the literal with its surrounding quotes
        quoted
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .map(str::to_string)
            .ok_or_else(|| {
                SqlTemplateError::EscapeError(format!("unexpected quote() result: {quoted}"))
            })
    }
}
