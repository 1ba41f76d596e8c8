//! Expression parser: resolves entity references against the catalog.
//!
//! An expression is a sequence of lexemes. Entity references such as
//! `GAMMA.START_LEVEL.ENERGY` become qualified columns and contribute tables
//! and join predicates; named constants become literals; everything else is
//! passed through verbatim.

use crate::error::Diagnostic;
use crate::lexer::{lex, SpannedLexeme};
use ndlab_core::{Catalog, Constant, EntityDef, FieldDef, RelationDef, WILDCARD};
use tracing::warn;

/// Result of parsing one expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedExpression {
    /// Rewritten lexemes, in source order.
    pub fragments: Vec<String>,
    /// Table entries referenced, first occurrence order, no duplicates.
    pub tables: Vec<String>,
    /// Join predicates and entity conditions, no duplicates.
    pub predicates: Vec<String>,
    /// Tables of the root entities referenced.
    pub principal_tables: Vec<String>,
    /// Tokens that looked like references but did not resolve.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedExpression {
    /// The rewritten expression text.
    pub fn text(&self) -> String {
        self.fragments.join(" ")
    }

    /// Whether nothing was parsed.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn add_table(&mut self, table: String) {
        push_unique(&mut self.tables, table);
    }

    fn add_predicate(&mut self, predicate: String) {
        push_unique(&mut self.predicates, predicate);
    }

    fn add_principal(&mut self, table: String) {
        push_unique(&mut self.principal_tables, table);
    }
}

pub(crate) fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

/// What a reference ends in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Terminal<'c> {
    /// A single column.
    Field(&'c FieldDef),
    /// Every column (`*` or `ALL`).
    Wildcard,
}

/// A resolved `ENTITY.RELATION...TERMINAL` path.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference<'c> {
    /// The entity the path starts from.
    pub root: &'c EntityDef,
    /// Relations traversed, each with its target entity.
    pub hops: Vec<(&'c RelationDef, &'c EntityDef)>,
    /// The final segment.
    pub terminal: Terminal<'c>,
}

impl Reference<'_> {
    /// Record tables and predicates in `out` and return the SQL fragment.
    fn render(&self, out: &mut ParsedExpression) -> String {
        let root_table = self.root.table.as_str();
        out.add_table(root_table.to_string());
        out.add_principal(root_table.to_string());
        if let Some(condition) = &self.root.condition {
            out.add_predicate(condition.clone());
        }

        let mut qualifier = root_table;
        for (relation, target) in &self.hops {
            out.add_table(relation.table_entry(&target.table));
            for predicate in relation.predicates(qualifier, &target.table) {
                out.add_predicate(predicate);
            }
            qualifier = relation.qualifier(&target.table);
        }

        match self.terminal {
            Terminal::Field(field) => format!("{}.{}", qualifier, field.column),
            Terminal::Wildcard if self.hops.is_empty() => format!("distinct {}.*", qualifier),
            Terminal::Wildcard => format!("{}.*", qualifier),
        }
    }
}

/// Classification of one lexeme.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'c> {
    /// Passed through verbatim.
    Literal,
    /// A named constant.
    Constant(&'static Constant),
    /// A resolved entity reference.
    Reference(Reference<'c>),
    /// Starts with an entity name but does not resolve.
    Unresolved(Diagnostic),
}

/// Parser over a catalog.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'c> {
    catalog: &'c Catalog,
}

impl<'c> Parser<'c> {
    /// Create a parser over a catalog.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Parse an expression.
    ///
    /// Never fails: unresolved tokens are logged, recorded as diagnostics and
    /// passed through unchanged.
    pub fn parse(&self, source: &str) -> ParsedExpression {
        let mut out = ParsedExpression::default();

        for lexeme in lex(source) {
            let fragment = match self.classify(&lexeme) {
                Token::Literal => lexeme.text.to_string(),
                Token::Constant(constant) => constant.literal(),
                Token::Reference(reference) => reference.render(&mut out),
                Token::Unresolved(diagnostic) => {
                    warn!(token = lexeme.text, reason = %diagnostic, "unresolved token");
                    out.diagnostics.push(diagnostic);
                    lexeme.text.to_string()
                }
            };
            out.fragments.push(fragment);
        }

        out
    }

    /// Classify a single lexeme.
    pub fn classify(&self, lexeme: &SpannedLexeme<'_>) -> Token<'c> {
        if lexeme.is_quoted() {
            return Token::Literal;
        }
        if let Some(constant) = self.catalog.constant(lexeme.text) {
            return Token::Constant(constant);
        }

        let mut segments = lexeme.text.split('.');
        let root = match segments.next().and_then(|name| self.catalog.get_entity(name)) {
            Some(root) if lexeme.text.contains('.') => root,
            _ => return Token::Literal,
        };
        let segments: Vec<&str> = segments.collect();
        let Some((last, path)) = segments.split_last() else {
            return Token::Literal;
        };

        let unresolved = |message: String| Diagnostic::new(message, lexeme.text, lexeme.span);

        let mut current = root;
        let mut hops = Vec::with_capacity(path.len());
        for name in path {
            let hop = current.get_relation(name).and_then(|relation| {
                self.catalog
                    .get_entity(&relation.target)
                    .map(|target| (relation, target))
            });
            match hop {
                Some((relation, target)) => {
                    hops.push((relation, target));
                    current = target;
                }
                None => {
                    return Token::Unresolved(unresolved(format!(
                        "unknown relation '{}' on entity '{}'",
                        name, current.name
                    )));
                }
            }
        }

        let terminal = if *last == WILDCARD || *last == "*" {
            Terminal::Wildcard
        } else if let Some(field) = current.get_field(last) {
            Terminal::Field(field)
        } else if current.get_relation(last).is_some() {
            return Token::Unresolved(
                unresolved(format!(
                    "relation '{}' on entity '{}' needs a field",
                    last, current.name
                ))
                .with_hint(format!("use {}.{}", lexeme.text, WILDCARD)),
            );
        } else {
            let diagnostic = unresolved(format!(
                "unknown field '{}' on entity '{}'",
                last, current.name
            ));
            return Token::Unresolved(match glued_attribute(current, last) {
                Some(name) => diagnostic.with_hint(format!(
                    "missing whitespace after '{}'? retry with boundary cleanup",
                    name
                )),
                None => diagnostic,
            });
        };

        Token::Reference(Reference {
            root,
            hops,
            terminal,
        })
    }
}

/// Longest attribute name that `segment` starts with, if any.
fn glued_attribute<'e>(entity: &'e EntityDef, segment: &str) -> Option<&'e str> {
    entity
        .attribute_names()
        .filter(|name| segment.starts_with(name))
        .max_by_key(|name| name.len())
}
