//! Lexer for field and filter expressions using logos.
//!
//! Expressions are split into whitespace-separated words and quoted string
//! literals. Everything else (operators, numbers, SQL keywords) travels
//! inside words and is left to the database.

use crate::span::Span;
use logos::Logos;

/// Lexeme kinds.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Lexeme {
    /// Single-quoted SQL string literal; `''` escapes a quote.
    #[regex(r"'([^']|'')*'")]
    Quoted,

    /// A quote never closed; runs to the end of the expression.
    #[regex(r"'([^']|'')*")]
    Unterminated,

    /// A run of non-blank characters outside quotes.
    #[regex(r"[^ \t\r\n\f']+")]
    Word,
}

/// A lexeme with its source text and span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedLexeme<'s> {
    pub lexeme: Lexeme,
    pub text: &'s str,
    pub span: Span,
}

impl SpannedLexeme<'_> {
    /// Whether this lexeme is a quoted literal, closed or not.
    pub fn is_quoted(&self) -> bool {
        matches!(self.lexeme, Lexeme::Quoted | Lexeme::Unterminated)
    }
}

/// Split an expression into lexemes.
///
/// Anything neither pattern accepts comes back as a plain word so the text
/// survives translation unchanged.
pub fn lex(source: &str) -> Vec<SpannedLexeme<'_>> {
    let mut lexer = Lexeme::lexer(source);
    let mut out = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        out.push(SpannedLexeme {
            lexeme: result.unwrap_or(Lexeme::Word),
            text: lexer.slice(),
            span: span.into(),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<(Lexeme, &str)> {
        lex(source).into_iter().map(|l| (l.lexeme, l.text)).collect()
    }

    #[test]
    fn test_words_and_quotes() {
        assert_eq!(
            kinds("NUCLIDE.NUC_ID = '135XE'"),
            vec![
                (Lexeme::Word, "NUCLIDE.NUC_ID"),
                (Lexeme::Word, "="),
                (Lexeme::Quoted, "'135XE'"),
            ]
        );
    }

    #[test]
    fn test_quoted_keeps_spaces_and_escapes() {
        assert_eq!(
            kinds("LEVEL.JP = '(3/2 ''+'')' and"),
            vec![
                (Lexeme::Word, "LEVEL.JP"),
                (Lexeme::Word, "="),
                (Lexeme::Quoted, "'(3/2 ''+'')'"),
                (Lexeme::Word, "and"),
            ]
        );
    }

    #[test]
    fn test_quote_glued_to_word() {
        assert_eq!(
            kinds("NUCLIDE.NUC_ID='135XE'"),
            vec![(Lexeme::Word, "NUCLIDE.NUC_ID="), (Lexeme::Quoted, "'135XE'")]
        );
    }

    #[test]
    fn test_spans() {
        let lexemes = lex("  GAMMA.ENERGY\t> 100");
        assert_eq!(lexemes[0].span, Span::new(2, 14));
        assert_eq!(lexemes[2].span, Span::new(17, 20));
    }

    #[test]
    fn test_unterminated_quote_survives() {
        assert_eq!(
            kinds("x = 'abc  def"),
            vec![
                (Lexeme::Word, "x"),
                (Lexeme::Word, "="),
                (Lexeme::Unterminated, "'abc  def"),
            ]
        );
        assert_eq!(
            kinds("'ok' and 'it''s"),
            vec![
                (Lexeme::Quoted, "'ok'"),
                (Lexeme::Word, "and"),
                (Lexeme::Unterminated, "'it''s"),
            ]
        );
        assert!(lex("x = 'abc")[2].is_quoted());
    }
}
