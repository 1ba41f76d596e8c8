//! Boundary repair for hand-typed expressions.
//!
//! Users often glue operators to references (`NUCLIDE.Z>50`) or put a
//! reference right after a parenthesis (`(LEVEL.ENERGY<100`). The tokenizer
//! inserts whitespace around every entity reference so the parser sees it as
//! one lexeme. Quoted literals are never touched.

use crate::lexer::lex;
use ndlab_core::{Catalog, EntityDef, WILDCARD};

/// Upper bound on repair passes; a pass is normally already a fixed point.
const MAX_PASSES: usize = 8;

/// Segments starting with one of these only match the name itself.
const GUARDED_PREFIXES: &[&str] = &["NUC_ID"];

/// Inserts whitespace at entity reference boundaries.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'c> {
    catalog: &'c Catalog,
}

impl<'c> Tokenizer<'c> {
    /// Create a tokenizer over a catalog.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Rewrite `source` so every entity reference stands alone.
    ///
    /// The result uses single spaces between lexemes and is stable under a
    /// second application.
    pub fn clean(&self, source: &str) -> String {
        let mut current = self.pass(source);
        for _ in 1..MAX_PASSES {
            let next = self.pass(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn pass(&self, source: &str) -> String {
        lex(source)
            .into_iter()
            .map(|lexeme| {
                if lexeme.is_quoted() {
                    lexeme.text.to_string()
                } else {
                    self.clean_word(lexeme.text)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn clean_word(&self, word: &str) -> String {
        let mut out = String::with_capacity(word.len() + 8);
        let mut rest = word;
        let mut previous = None;

        while let Some((start, entity)) = self.find_reference(rest, previous) {
            out.push_str(&rest[..start]);
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }

            let reference = &rest[start..];
            let (len, split) = self.reference_len(entity, reference);
            out.push_str(&reference[..len]);
            rest = &reference[len..];

            if split {
                out.push(' ');
            }
            previous = out.chars().next_back();
        }

        out.push_str(rest);
        out
    }

    /// Earliest entity name in `text` that starts a reference.
    fn find_reference(&self, text: &str, previous: Option<char>) -> Option<(usize, &'c EntityDef)> {
        let mut best: Option<(usize, &'c EntityDef)> = None;

        for entity in self.catalog.entities() {
            let name = entity.name.as_str();
            let found = text.match_indices(name).map(|(idx, _)| idx).find(|&idx| {
                let before = if idx == 0 {
                    previous
                } else {
                    text[..idx].chars().next_back()
                };
                text[idx + name.len()..].starts_with('.') && !before.is_some_and(continues_name)
            });

            if let Some(idx) = found {
                let better = match best {
                    None => true,
                    Some((at, current)) => {
                        idx < at || (idx == at && name.len() > current.name.len())
                    }
                };
                if better {
                    best = Some((idx, entity));
                }
            }
        }

        best
    }

    /// Length of the reference at the start of `text` and whether anything
    /// after it must be split off.
    fn reference_len(&self, entity: &'c EntityDef, text: &str) -> (usize, bool) {
        let mut current = entity;
        let mut dot = entity.name.len();

        loop {
            let start = dot + 1;
            let end = text[start..].find('.').map_or(text.len(), |i| start + i);
            let segment = &text[start..end];

            if end < text.len() {
                let target = current
                    .get_relation(segment)
                    .and_then(|relation| self.catalog.get_entity(&relation.target));
                if let Some(target) = target {
                    current = target;
                    dot = end;
                    continue;
                }
            }

            return match longest_attribute(current, segment) {
                Some(matched) if start + matched < text.len() => (start + matched, true),
                Some(_) => (text.len(), false),
                None => (end, false),
            };
        }
    }
}

fn continues_name(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '.'
}

/// End offset of the longest attribute name found in `segment`.
///
/// Ties go to the earliest match. A match directly followed by `_` is part
/// of a longer name and does not count.
fn longest_attribute(entity: &EntityDef, segment: &str) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;

    for name in entity.attribute_names().chain([WILDCARD, "*"]) {
        let guarded = GUARDED_PREFIXES
            .iter()
            .any(|prefix| segment.starts_with(prefix) && name != *prefix && name != segment);
        if guarded || name.is_empty() {
            continue;
        }

        let found = segment
            .match_indices(name)
            .map(|(idx, _)| idx)
            .find(|&idx| !segment[idx + name.len()..].starts_with('_'));

        if let Some(idx) = found {
            let better = match best {
                None => true,
                Some((at, len)) => name.len() > len || (name.len() == len && idx < at),
            };
            if better {
                best = Some((idx, name.len()));
            }
        }
    }

    best.map(|(at, len)| at + len)
}
