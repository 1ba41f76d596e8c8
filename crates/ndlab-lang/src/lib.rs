//! NDLab expression language.
//!
//! Translates field lists and filters written against the nuclear-data
//! entities into SQL text.
//!
//! # Expressions
//!
//! ```text
//! NUCLIDE.Z NUCLIDE.N NUCLIDE.NUC_ID            fields of one entity
//! GAMMA.START_LEVEL.ENERGY                      a field reached through a relation
//! LEVEL.*  LEVEL.ALL  L_DECAY.DAUGHTER.ALL      every column
//! L_DECAY.MODE = DECAY_Bm and L_DECAY.PERC > 10 filters, with named constants
//! LEVEL.NUC_ID = '135XE' ORDER BY LEVEL.SEQNO   trailing clauses
//! ```
//!
//! Anything that is not an entity reference or a named constant (operators,
//! numbers, quoted strings, SQL keywords) is passed through to the database.
//!
//! # Pipeline
//!
//! 1. [`Tokenizer`] optionally inserts whitespace around references
//! 2. [`Parser`] resolves references into columns, tables and predicates
//! 3. [`JoinRules`] add predicates for table pairs without a relation path
//! 4. [`Translator::assemble`] checks the principal table and builds a [`QueryPlan`]

pub mod assembler;
pub mod error;
pub mod join;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod tokenizer;
pub mod translator;

pub use assembler::QueryPlan;
pub use error::{Diagnostic, TranslateError};
pub use join::{JoinRule, JoinRules, NUCLEAR_RULES};
pub use parser::{ParsedExpression, Parser};
pub use span::Span;
pub use tokenizer::Tokenizer;
pub use translator::Translator;

/// Translate a request against the global catalog.
pub fn translate(fields: &str, filter: &str) -> Result<QueryPlan, TranslateError> {
    Translator::new(ndlab_core::Catalog::global()).assemble(fields, filter)
}
