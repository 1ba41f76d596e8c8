//! Turning result rows into typed model instances.

use ndlab_core::Row;
use std::collections::HashSet;

/// A model instance with a stable identity.
pub trait Entity {
    /// Primary key derived from the identifying fields.
    fn primary_key(&self) -> String;

    /// Filter that produced this instance.
    fn source_filter(&self) -> &str;
}

/// A model instance that maps one row of a catalog entity.
pub trait FromRow: Entity + Sized {
    /// Catalog entity the rows come from.
    const ENTITY: &'static str;

    /// Build an instance from a row. Missing or malformed columns become
    /// absent values, never errors.
    fn from_row(row: &Row, filter: &str) -> Self;
}

/// Build one instance per row.
pub fn materialize<T: FromRow>(rows: &[Row], filter: &str) -> Vec<T> {
    rows.iter().map(|row| T::from_row(row, filter)).collect()
}

/// Keep the first instance of every primary key, preserving order.
pub fn remove_duplicates<T: Entity>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.primary_key()))
        .collect()
}

/// Text column, empty when missing.
pub(crate) fn text(row: &Row, column: &str) -> String {
    row.text(column).unwrap_or_default()
}

/// Identifying integer column, 0 when missing.
pub(crate) fn seqno(row: &Row, column: &str) -> i64 {
    row.int(column).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Probe {
        key: String,
        label: String,
        filter: String,
    }

    impl Entity for Probe {
        fn primary_key(&self) -> String {
            self.key.clone()
        }

        fn source_filter(&self) -> &str {
            &self.filter
        }
    }

    impl FromRow for Probe {
        const ENTITY: &'static str = "NUCLIDE";

        fn from_row(row: &Row, filter: &str) -> Self {
            Self {
                key: text(row, "nucid"),
                label: text(row, "label"),
                filter: filter.to_string(),
            }
        }
    }

    #[test]
    fn test_materialize_records_filter() {
        let rows = vec![
            Row::new().with("nucid", "135XE"),
            Row::new().with("nucid", "135CS"),
        ];
        let items: Vec<Probe> = materialize(&rows, "NUCLIDE.Z > 50");

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].key, "135CS");
        assert!(items.iter().all(|p| p.source_filter() == "NUCLIDE.Z > 50"));
    }

    #[test]
    fn test_remove_duplicates_keeps_first() {
        let rows = vec![
            Row::new().with("nucid", "A").with("label", "first"),
            Row::new().with("nucid", "B").with("label", "only"),
            Row::new().with("nucid", "A").with("label", "second"),
        ];
        let items = remove_duplicates(materialize::<Probe>(&rows, ""));

        let labels: Vec<_> = items.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "only"]);
    }

    #[test]
    fn test_missing_columns_default() {
        let row = Row::new();
        assert_eq!(text(&row, "nucid"), "");
        assert_eq!(seqno(&row, "l_seqno"), 0);
    }
}
