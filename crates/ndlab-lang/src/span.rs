//! Source location tracking for diagnostics.

/// A byte range in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of the span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The spanned text of `source`, if the span lies on char boundaries.
    pub fn slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start..self.end)
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

/// Convert byte offset to line/column, both 1-based.
pub fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;

    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }

        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}

/// Move a span of `cleaned` onto `source`.
///
/// `cleaned` must differ from `source` only in whitespace. The span is
/// carried over by matching non-whitespace chars in order; `None` when the
/// two texts disagree or the span does not start and end on such chars.
pub fn map_to_source(cleaned: &str, source: &str, span: Span) -> Option<Span> {
    let significant = |text: &str| {
        text.char_indices()
            .filter(|(_, ch)| !ch.is_whitespace())
            .collect::<Vec<_>>()
    };
    let (mut start, mut end) = (None, None);

    for ((at, ch), (to, other)) in significant(cleaned).into_iter().zip(significant(source)) {
        if ch != other {
            return None;
        }
        if at == span.start {
            start = Some(to);
        }
        if at + ch.len_utf8() == span.end {
            end = Some(to + ch.len_utf8());
            break;
        }
    }

    Some(Span::new(start?, end?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice() {
        let source = "LEVEL.ENERGY > 100";
        assert_eq!(Span::new(0, 12).slice(source), Some("LEVEL.ENERGY"));
        assert_eq!(Span::new(0, 99).slice(source), None);
        assert_eq!(Span::from(6..12).len(), 6);
    }

    #[test]
    fn test_line_col_conversion() {
        let source = "NUCLIDE.Z > 50\nand NUCLIDE.N < 80";

        assert_eq!(offset_to_line_col(source, 0), (1, 1));
        assert_eq!(offset_to_line_col(source, 8), (1, 9));
        assert_eq!(offset_to_line_col(source, 15), (2, 1));
        assert_eq!(offset_to_line_col(source, 19), (2, 5));
    }

    #[test]
    fn test_map_to_source() {
        let source = "LEVEL.ENERGY>100  and\tLEVEL.SPIN = 2";
        let cleaned = "LEVEL.ENERGY >100 and LEVEL.SPIN = 2";

        let span = map_to_source(cleaned, source, Span::new(22, 32)).unwrap();
        assert_eq!(span.slice(source), Some("LEVEL.SPIN"));

        let span = map_to_source(cleaned, source, Span::new(13, 17)).unwrap();
        assert_eq!(span.slice(source), Some(">100"));

        assert_eq!(map_to_source(cleaned, "LEVEL.ENERGY", Span::new(22, 32)), None);
    }
}
