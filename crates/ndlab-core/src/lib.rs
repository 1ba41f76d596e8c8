//! NDLab Core - schema catalog, result rows, and measured quantities.
//!
//! This crate holds the pieces shared by the query translator and the data
//! model: the read-only [`Catalog`] of nuclear-data entities, the [`Row`]
//! shape delivered by executors, and the [`Quantity`] algebra.

pub mod catalog;
pub mod error;
pub mod row;
pub mod value;

pub use catalog::{
    Catalog, Constant, ConstantValue, EntityDef, FieldDef, FieldKind, JoinColumns, RelationDef, WILDCARD,
};
pub use error::Error;
pub use row::{RawValue, Row};
pub use value::{Qualifier, Quantity};
