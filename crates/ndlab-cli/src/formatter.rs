//! Output formatters for query results.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use ndlab_core::{RawValue, Row};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter {
    /// Format result rows.
    fn format_rows(&self, rows: &[Row]) -> String;

    /// Format an error message.
    fn format_error(&self, error: &str) -> String;

    /// Format a simple message.
    fn format_message(&self, message: &str) -> String;

    /// Format the list of entities.
    fn format_schema(&self, entities: &[&str]) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_rows(&self, rows: &[Row]) -> String {
        let Some(first) = rows.first() else {
            return "No results".to_string();
        };

        let mut table = Table::new();
        table.set_header(first.column_names().map(Cell::new).collect::<Vec<_>>());
        for row in rows {
            table.add_row(row.values().map(|v| Cell::new(format_value(v))).collect::<Vec<_>>());
        }

        format!("{}\n{} row(s)", table, rows.len())
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }

    fn format_schema(&self, entities: &[&str]) -> String {
        let mut table = Table::new();
        table.set_header(vec!["Entity"]);

        for entity in entities {
            table.add_row(vec![entity]);
        }

        table.to_string()
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_rows(&self, rows: &[Row]) -> String {
        let array: Vec<serde_json::Value> = rows.iter().map(row_to_json).collect();
        serde_json::to_string_pretty(&array).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({
            "error": error
        })
        .to_string()
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({
            "message": message
        })
        .to_string()
    }

    fn format_schema(&self, entities: &[&str]) -> String {
        serde_json::to_string_pretty(entities).unwrap_or_else(|_| "[]".to_string())
    }
}

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_rows(&self, rows: &[Row]) -> String {
        let Some(first) = rows.first() else {
            return String::new();
        };

        let mut output = first.column_names().collect::<Vec<_>>().join(",");
        output.push('\n');
        for row in rows {
            let cells: Vec<String> = row.values().map(format_value_csv).collect();
            output.push_str(&cells.join(","));
            output.push('\n');
        }

        output
    }

    fn format_error(&self, error: &str) -> String {
        format!("error\n\"{}\"", escape_csv(error))
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }

    fn format_schema(&self, entities: &[&str]) -> String {
        let mut output = String::from("entity\n");
        for entity in entities {
            output.push_str(&format!("{}\n", entity));
        }
        output
    }
}

/// Format a value as a display string.
fn format_value(value: &RawValue) -> String {
    value.to_string()
}

/// Format a value for CSV output.
fn format_value_csv(value: &RawValue) -> String {
    match value {
        RawValue::Null => String::new(),
        RawValue::Text(s) => format!("\"{}\"", escape_csv(s)),
        _ => format_value(value),
    }
}

/// Convert a row to a JSON object.
fn row_to_json(row: &Row) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    for (name, value) in row.column_names().zip(row.values()) {
        obj.insert(name.to_string(), value_to_json(value));
    }
    serde_json::Value::Object(obj)
}

/// Convert a value to JSON.
fn value_to_json(value: &RawValue) -> serde_json::Value {
    match value {
        RawValue::Null => serde_json::Value::Null,
        RawValue::Integer(i) => serde_json::Value::Number((*i).into()),
        RawValue::Real(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        RawValue::Text(s) => serde_json::Value::String(s.clone()),
    }
}

/// Escape a string for CSV.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"")
}
