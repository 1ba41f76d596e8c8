//! Diagnostics and errors produced while translating expressions.

use crate::span::{offset_to_line_col, Span};
use thiserror::Error;

/// A token the parser could not resolve against the catalog.
///
/// Diagnostics never stop a translation: the offending token is passed
/// through to the SQL text and the database reports the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct Diagnostic {
    /// The error message.
    pub message: String,
    /// The unresolved token as written.
    pub token: String,
    /// Source span of the token.
    pub span: Span,
    /// Optional hint for fixing the expression.
    pub hint: Option<String>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(message: impl Into<String>, token: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            token: token.into(),
            span,
            hint: None,
        }
    }

    /// Add a hint to the diagnostic.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Format the diagnostic with source context.
    pub fn format_with_source(&self, source: &str) -> String {
        let (line, col) = offset_to_line_col(source, self.span.start);
        let mut result = format!("warning: {}\n", self.message);
        result.push_str(&format!("  --> line {}:{}\n", line, col));

        if let Some(source_line) = source.lines().nth(line - 1) {
            result.push_str(&format!("   |\n{:3}| {}\n   |", line, source_line));

            for _ in 0..col {
                result.push(' ');
            }
            result.push('^');

            let span_len = self.span.len();
            if span_len > 1 {
                let room = source_line.chars().count().saturating_sub(col) + 1;
                for _ in 1..span_len.min(room) {
                    result.push('~');
                }
            }
            result.push('\n');
        }

        if let Some(hint) = &self.hint {
            result.push_str(&format!("   = hint: {}\n", hint));
        }

        result
    }
}

/// Errors that reject a request outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// Fields and filter together do not name exactly one root table.
    #[error(
        "expected exactly one principal table, found {}: [{}]",
        .tables.len(),
        .tables.join(", ")
    )]
    AmbiguousPrincipalTable {
        /// The principal tables that were found.
        tables: Vec<String>,
    },
}
