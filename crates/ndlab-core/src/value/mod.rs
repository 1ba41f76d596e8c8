//! Measurement-value algebra.
//!
//! Every measured field of the data model is a [`Quantity`]: a value, its
//! standard uncertainty and a [`Qualifier`]. Arithmetic propagates the
//! uncertainty to first order and composes the qualifiers.

mod qualifier;
mod quantity;

pub use qualifier::Qualifier;
pub use quantity::Quantity;
