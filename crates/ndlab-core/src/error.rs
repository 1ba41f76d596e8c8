//! Core error types.

use thiserror::Error;

/// Catalog and data model errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Entity is not registered in the catalog.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// Relation is not declared on the entity, or points nowhere.
    #[error("unknown relation {relation} on entity {entity}")]
    UnknownRelation {
        /// Entity name.
        entity: String,
        /// Relation name.
        relation: String,
    },

    /// Catalog failed validation.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}
