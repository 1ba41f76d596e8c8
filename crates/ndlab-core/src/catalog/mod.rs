//! Schema catalog for NDLab.
//!
//! The catalog describes every entity that may appear in an expression: its
//! table, its fields (scalars and measurement triples), its relations to other
//! entities, and the named constants that expressions may use.

mod constant;
mod entity;
mod field;
mod nuclear;
mod registry;
mod relation;

pub use constant::{find_constant, Constant, ConstantValue, CONSTANTS};
pub use entity::{EntityDef, WILDCARD};
pub use field::{FieldDef, FieldKind};
pub use registry::Catalog;
pub use relation::{JoinColumns, RelationDef};
