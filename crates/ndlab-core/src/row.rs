//! Result rows as delivered by an executor.

use serde::Serialize;

/// A raw column value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    /// SQL NULL.
    Null,
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Real(f64),
    /// Text value.
    Text(String),
}

impl RawValue {
    /// Whether the value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Text form of the value; `None` for NULL.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Null => None,
            RawValue::Integer(v) => Some(v.to_string()),
            RawValue::Real(v) => Some(v.to_string()),
            RawValue::Text(v) if v == "None" => None,
            RawValue::Text(v) => Some(v.clone()),
        }
    }

    /// Permissive float conversion; failures yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Null => None,
            RawValue::Integer(v) => Some(*v as f64),
            RawValue::Real(v) => Some(*v),
            RawValue::Text(v) => v.trim().parse().ok(),
        }
    }

    /// Permissive integer conversion; failures yield `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawValue::Null => None,
            RawValue::Integer(v) => Some(*v),
            RawValue::Real(v) if v.fract() == 0.0 => Some(*v as i64),
            RawValue::Real(_) => None,
            RawValue::Text(v) => v.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Null => write!(f, "NULL"),
            RawValue::Integer(v) => write!(f, "{}", v),
            RawValue::Real(v) => write!(f, "{}", v),
            RawValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Integer(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Real(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Integer(v.into())
    }
}

impl From<Option<&str>> for RawValue {
    fn from(v: Option<&str>) -> Self {
        v.map_or(RawValue::Null, RawValue::from)
    }
}

/// One result row: column names to raw values, in select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, RawValue)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.push(column, value);
        self
    }

    /// Append a column.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<RawValue>) {
        self.columns.push((column.into(), value.into()));
    }

    /// Raw value of a column, first match wins.
    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Whether the row carries the column at all.
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Column as text.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(RawValue::as_text)
    }

    /// Column as integer.
    pub fn int(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(RawValue::as_i64)
    }

    /// Column as float.
    pub fn float(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(RawValue::as_f64)
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Column values in order.
    pub fn values(&self) -> impl Iterator<Item = &RawValue> {
        self.columns.iter().map(|(_, value)| value)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_conversion() {
        let row = Row::new()
            .with("z", 54)
            .with("energy", "1234.5")
            .with("half_life", "STABLE")
            .with("jp_str", "None")
            .with("qa", RawValue::Null);

        assert_eq!(row.int("z"), Some(54));
        assert_eq!(row.float("z"), Some(54.0));
        assert_eq!(row.float("energy"), Some(1234.5));
        assert_eq!(row.float("half_life"), None);
        assert_eq!(row.text("jp_str"), None);
        assert_eq!(row.text("qa"), None);
        assert!(row.contains("qa"));
        assert!(!row.contains("sn"));
    }

    #[test]
    fn test_integer_from_real() {
        assert_eq!(RawValue::Real(3.0).as_i64(), Some(3));
        assert_eq!(RawValue::Real(3.5).as_i64(), None);
        assert_eq!(RawValue::from(" 7 ").as_i64(), Some(7));
    }

    #[test]
    fn test_column_order() {
        let row = Row::new().with("b", 1).with("a", 2);
        assert_eq!(row.column_names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(row.len(), 2);
    }
}
