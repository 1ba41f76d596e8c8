//! Session configuration.

use std::path::PathBuf;

/// Default database file.
pub const DEFAULT_DB_PATH: &str = "ndlab_db.s3db";

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the SQLite database.
    pub db_path: PathBuf,

    /// Insert whitespace around entity references before every translation.
    pub force_clean: bool,

    /// Log generated SQL at info level instead of debug.
    pub print_sql: bool,

    /// Retry a failed query once with boundary cleanup.
    pub retry: bool,
}

impl Config {
    /// Create a configuration for the given database.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            force_clean: false,
            print_sql: false,
            retry: true,
        }
    }

    /// Set whether boundary cleanup always runs.
    pub fn with_force_clean(mut self, force_clean: bool) -> Self {
        self.force_clean = force_clean;
        self
    }

    /// Set whether generated SQL is logged at info level.
    pub fn with_print_sql(mut self, print_sql: bool) -> Self {
        self.print_sql = print_sql;
        self
    }

    /// Set whether failed queries are retried.
    pub fn with_retry(mut self, retry: bool) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}
