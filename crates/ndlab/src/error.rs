//! Error types.

use thiserror::Error;

/// NDLab errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] ndlab_core::Error),

    /// The request could not be translated.
    #[error("translation error: {0}")]
    Translate(#[from] ndlab_lang::TranslateError),

    /// The database rejected a query, after any retry.
    #[error("execution failed: {message} (sql: {sql})")]
    Execution { sql: String, message: String },

    /// SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A navigation target does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },
}

impl Error {
    /// Create a not-found error.
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            key: key.into(),
        }
    }
}
