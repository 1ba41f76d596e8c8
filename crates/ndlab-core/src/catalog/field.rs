//! Field definitions for entities.

/// How a column takes part in the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain scalar (number or code).
    Scalar,
    /// Free text.
    Text,
    /// Value column of a measured quantity.
    Quantity,
    /// `_unc` or `_limit` companion of a measured quantity.
    Component,
}

/// A field definition within an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name as written in expressions (e.g. `NUC_ID`).
    pub name: String,
    /// Column name in the backing table (e.g. `nucid`).
    pub column: String,
    /// Human readable description.
    pub description: String,
    /// Field kind.
    pub kind: FieldKind,
}

impl FieldDef {
    /// Create a new field.
    pub fn new(name: impl Into<String>, column: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            description: String::new(),
            kind,
        }
    }

    /// Create a scalar field.
    pub fn scalar(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self::new(name, column, FieldKind::Scalar)
    }

    /// Create a text field.
    pub fn text(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self::new(name, column, FieldKind::Text)
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether the field belongs to a measurement triple.
    pub fn is_measurement(&self) -> bool {
        matches!(self.kind, FieldKind::Quantity | FieldKind::Component)
    }

    /// Expand a measured quantity into its value, uncertainty and limit fields.
    pub fn quantity(name: &str, column: &str, description: impl Into<String>) -> Vec<FieldDef> {
        let mut fields = Self::quantity_without_limit(name, column, description);
        fields.push(
            Self::new(
                format!("{name}_LIMIT"),
                format!("{column}_limit"),
                FieldKind::Component,
            )
            .with_description("qualifier of the value: =, <, >, <=, >=, ~, CA, ?"),
        );
        fields
    }

    /// Expand a measured quantity that is never reported as a bound.
    pub fn quantity_without_limit(
        name: &str,
        column: &str,
        description: impl Into<String>,
    ) -> Vec<FieldDef> {
        vec![
            Self::new(name, column, FieldKind::Quantity).with_description(description),
            Self::new(
                format!("{name}_UNC"),
                format!("{column}_unc"),
                FieldKind::Component,
            )
            .with_description("uncertainty"),
        ]
    }
}
