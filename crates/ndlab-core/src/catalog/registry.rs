//! The entity catalog.

use super::constant::{find_constant, Constant};
use super::entity::EntityDef;
use crate::error::Error;
use std::sync::OnceLock;

/// Read-only registry of every entity and named constant.
///
/// Built once and shared; nothing mutates a catalog after construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entities: Vec<EntityDef>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide nuclear-data catalog.
    pub fn global() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(super::nuclear::nuclear_data)
    }

    /// Add an entity to the catalog.
    pub fn with_entity(mut self, entity: EntityDef) -> Self {
        self.entities.push(entity);
        self
    }

    /// Get an entity by name.
    pub fn get_entity(&self, name: &str) -> Option<&EntityDef> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Get an entity by name, failing if it is not registered.
    pub fn entity(&self, name: &str) -> Result<&EntityDef, Error> {
        self.get_entity(name)
            .ok_or_else(|| Error::UnknownEntity(name.to_string()))
    }

    /// All entities in registration order.
    pub fn entities(&self) -> &[EntityDef] {
        &self.entities
    }

    /// List all entity names.
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.name.as_str()).collect()
    }

    /// Look up a named constant.
    pub fn constant(&self, name: &str) -> Option<&'static Constant> {
        find_constant(name)
    }

    /// Check that every relation points to a registered entity.
    pub fn validate(&self) -> Result<(), Error> {
        for entity in &self.entities {
            if self.entities.iter().filter(|e| e.name == entity.name).count() > 1 {
                return Err(Error::InvalidCatalog(format!(
                    "entity {} registered twice",
                    entity.name
                )));
            }
            for relation in &entity.relations {
                if self.get_entity(&relation.target).is_none() {
                    return Err(Error::UnknownRelation {
                        entity: entity.name.clone(),
                        relation: relation.name.clone(),
                    });
                }
                if relation.joins.is_empty() {
                    return Err(Error::InvalidCatalog(format!(
                        "relation {}.{} joins no columns",
                        entity.name, relation.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Text description of an entity: its fields and relations.
    pub fn describe(&self, name: &str) -> Result<String, Error> {
        let entity = self.entity(name)?;
        let mut out = format!("{} ({})", entity.name, entity.table);
        if !entity.description.is_empty() {
            out.push_str(&format!(": {}", entity.description));
        }
        out.push('\n');

        for field in entity.fields.iter().filter(|f| !f.description.is_empty()) {
            out.push_str(&format!(
                "  {}.{} -> {}  {}\n",
                entity.name, field.name, field.column, field.description
            ));
        }
        for relation in &entity.relations {
            out.push_str(&format!(
                "  {}.{} -> {}  {}\n",
                entity.name, relation.name, relation.target, relation.description
            ));
        }
        Ok(out)
    }
}
