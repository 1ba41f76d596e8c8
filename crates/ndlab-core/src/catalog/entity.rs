//! Entity definitions.

use super::field::FieldDef;
use super::relation::RelationDef;

/// Name of the whole-entity wildcard field.
pub const WILDCARD: &str = "ALL";

/// An entity definition: one addressable view over a table.
///
/// Several entities may share a physical table; they are then told apart by
/// their `condition`, a `where` fragment that is added whenever the entity is
/// used as a table (e.g. every `DR_*` radiation kind lives in `decay_radiations`).
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDef {
    /// Entity name (unique within the catalog).
    pub name: String,
    /// Backing table name.
    pub table: String,
    /// Predicate selecting this entity's rows from the table.
    pub condition: Option<String>,
    /// Human readable description.
    pub description: String,
    /// Field definitions.
    pub fields: Vec<FieldDef>,
    /// Relation definitions.
    pub relations: Vec<RelationDef>,
}

impl EntityDef {
    /// Create a new entity definition.
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            condition: None,
            description: String::new(),
            fields: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Set the row-selecting predicate.
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a field to the entity.
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Add multiple fields.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDef>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Add a measured quantity with value, uncertainty and limit columns.
    pub fn with_quantity(self, name: &str, column: &str, description: &str) -> Self {
        self.with_fields(FieldDef::quantity(name, column, description))
    }

    /// Add a measured quantity with value and uncertainty columns only.
    pub fn with_quantity_without_limit(self, name: &str, column: &str, description: &str) -> Self {
        self.with_fields(FieldDef::quantity_without_limit(name, column, description))
    }

    /// Add a relation.
    pub fn with_relation(mut self, relation: RelationDef) -> Self {
        self.relations.push(relation);
        self
    }

    /// Replace a field, keeping its position. Adds it if missing.
    pub fn replace_field(mut self, field: FieldDef) -> Self {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get a relation by name.
    pub fn get_relation(&self, name: &str) -> Option<&RelationDef> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Every name that may follow this entity in a dotted expression.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(|f| f.name.as_str())
            .chain(self.relations.iter().map(|r| r.name.as_str()))
    }
}
