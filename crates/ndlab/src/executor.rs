//! Query execution against the nuclear-data store.

use crate::error::Error;
use ndlab_core::{RawValue, Row};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Runs generated SQL and returns rows with column order preserved.
pub trait Executor {
    /// Execute a query.
    fn execute(&self, sql: &str) -> Result<Vec<Row>, Error>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, sql: &str) -> Result<Vec<Row>, Error> {
        (**self).execute(sql)
    }
}

/// Executor backed by a SQLite database.
pub struct SqliteExecutor {
    conn: Connection,
}

impl SqliteExecutor {
    /// Open an existing database read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, Error> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Wrap an existing connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Executor for SqliteExecutor {
    fn execute(&self, sql: &str) -> Result<Vec<Row>, Error> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Row::new();
            for (idx, column) in columns.iter().enumerate() {
                record.push(column.clone(), raw_value(row.get_ref(idx)?));
            }
            out.push(record);
        }
        Ok(out)
    }
}

fn raw_value(value: ValueRef<'_>) -> RawValue {
    match value {
        ValueRef::Null => RawValue::Null,
        ValueRef::Integer(v) => RawValue::Integer(v),
        ValueRef::Real(v) => RawValue::Real(v),
        ValueRef::Text(v) | ValueRef::Blob(v) => {
            RawValue::Text(String::from_utf8_lossy(v).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_execute_preserves_column_order() {
        let executor = SqliteExecutor::open_in_memory().unwrap();
        executor
            .connection()
            .execute_batch(
                "create table nuclides (nucid text, z integer, n integer, qa real);
                 insert into nuclides values ('135XE', 54, 81, null);",
            )
            .unwrap();

        let rows = executor
            .execute("select nucid, z, n, qa from nuclides")
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].column_names().collect::<Vec<_>>(),
            vec!["nucid", "z", "n", "qa"]
        );
        assert_eq!(rows[0].int("z"), Some(54));
        assert_eq!(rows[0].get("qa"), Some(&RawValue::Null));
    }

    #[test]
    fn test_execute_reports_sqlite_errors() {
        let executor = SqliteExecutor::open_in_memory().unwrap();
        let result = executor.execute("select * from missing_table");
        assert!(matches!(result, Err(Error::Sqlite(_))));
    }

    #[test]
    fn test_open_file_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ndlab.s3db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("create table levels (nucid text, l_seqno integer);")
            .unwrap();

        let executor = SqliteExecutor::open(&path).unwrap();
        assert!(executor.execute("select * from levels").unwrap().is_empty());
        assert!(executor
            .execute("insert into levels values ('1H', 0)")
            .is_err());
    }
}
