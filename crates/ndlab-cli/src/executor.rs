//! Request execution.

use crate::formatter::Formatter;
use ndlab::{Executor, Ndlab};
use thiserror::Error;

/// Execution errors.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// Library error.
    #[error("{0}")]
    Ndlab(#[from] ndlab::Error),

    /// A request needs a field list.
    #[error("no fields given, use --fields")]
    MissingFields,
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// List the catalog entities.
    Entities,
    /// Describe one entity.
    Describe(String),
    /// Check that the request has one principal table.
    Check { fields: String, filter: String },
    /// Print the SQL without executing it.
    Sql { fields: String, filter: String },
    /// Print the join rules the request fires.
    Explain { fields: String, filter: String },
    /// Execute the request.
    Query { fields: String, filter: String },
}

/// Execute a request and return formatted output.
pub fn execute<E: Executor>(
    db: &Ndlab<E>,
    request: &Request,
    formatter: &dyn Formatter,
) -> Result<String, ExecuteError> {
    match request {
        Request::Entities => Ok(formatter.format_schema(&db.catalog().entity_names())),
        Request::Describe(entity) => Ok(formatter.format_message(&db.describe(entity)?)),
        Request::Check { fields, filter } => {
            let fields = require(fields)?;
            let verdict = if db.query_check(fields, filter) {
                "ok: one principal table"
            } else {
                "invalid: expected exactly one principal table"
            };
            Ok(formatter.format_message(verdict))
        }
        Request::Sql { fields, filter } => {
            let sql = db.query_sql(require(fields)?, filter)?;
            Ok(formatter.format_message(&sql))
        }
        Request::Explain { fields, filter } => {
            let rules = db.query_desc(require(fields)?, filter);
            if rules.is_empty() {
                Ok(formatter.format_message("no join rules apply"))
            } else {
                Ok(formatter.format_message(&rules))
            }
        }
        Request::Query { fields, filter } => {
            let rows = db.query(require(fields)?, filter)?;
            tracing::info!(rows = rows.len(), "query complete");
            Ok(formatter.format_rows(&rows))
        }
    }
}

fn require(fields: &str) -> Result<&str, ExecuteError> {
    if fields.trim().is_empty() {
        Err(ExecuteError::MissingFields)
    } else {
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{create_formatter, OutputFormat};
    use ndlab::SqliteExecutor;
    use pretty_assertions::assert_eq;

    fn db() -> Ndlab<SqliteExecutor> {
        let executor = SqliteExecutor::open_in_memory().unwrap();
        executor
            .connection()
            .execute_batch(
                "create table nuclides (nucid text, z integer, n integer);
                 insert into nuclides values ('135XE', 54, 81);",
            )
            .unwrap();
        Ndlab::new(executor)
    }

    fn query(fields: &str, filter: &str) -> Request {
        Request::Query {
            fields: fields.to_string(),
            filter: filter.to_string(),
        }
    }

    #[test]
    fn test_query_as_csv() {
        let formatter = create_formatter(OutputFormat::Csv);
        let output = execute(
            &db(),
            &query("NUCLIDE.Z , NUCLIDE.N", "NUCLIDE.NUC_ID = '135XE'"),
            &*formatter,
        )
        .unwrap();
        assert_eq!(output, "z,n\n54,81\n");
    }

    #[test]
    fn test_missing_fields() {
        let formatter = create_formatter(OutputFormat::Table);
        let result = execute(&db(), &query(" ", ""), &*formatter);
        assert!(matches!(result, Err(ExecuteError::MissingFields)));
    }

    #[test]
    fn test_check_and_sql() {
        let formatter = create_formatter(OutputFormat::Table);
        let db = db();

        let check = Request::Check {
            fields: "NUCLIDE.Z LEVEL.ENERGY".to_string(),
            filter: String::new(),
        };
        assert!(execute(&db, &check, &*formatter).unwrap().starts_with("invalid"));

        let sql = Request::Sql {
            fields: "NUCLIDE.Z".to_string(),
            filter: String::new(),
        };
        assert_eq!(
            execute(&db, &sql, &*formatter).unwrap(),
            "select nuclides.z from nuclides"
        );
    }

    #[test]
    fn test_entities_and_describe() {
        let formatter = create_formatter(OutputFormat::Csv);
        let db = db();

        let entities = execute(&db, &Request::Entities, &*formatter).unwrap();
        assert!(entities.starts_with("entity\nNUCLIDE\nLEVEL\n"));

        let text = execute(&db, &Request::Describe("GAMMA".to_string()), &*formatter).unwrap();
        assert!(text.contains("GAMMA.START_LEVEL -> LEVEL"));
    }
}
