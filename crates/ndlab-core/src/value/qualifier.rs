//! Qualifiers of measured values and their composition rules.

use serde::Serialize;

/// How a reported number relates to the measured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Qualifier {
    /// Exact value.
    #[default]
    Eq,
    /// Upper bound.
    Lt,
    /// Lower bound.
    Gt,
    /// Upper bound, inclusive.
    Le,
    /// Lower bound, inclusive.
    Ge,
    /// Approximate value.
    Approx,
    /// Derived by calculation rather than measured.
    Calculated,
    /// Composition could not be determined.
    Problem,
}

impl Qualifier {
    /// Parse the content of a `_limit` column.
    ///
    /// Empty text means an exact value. Both symbolic (`<`, `>=`) and ENSDF
    /// letter codes (`LT`, `GE`, `AP`) are accepted; anything else is a problem.
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "" | "=" | "EQ" => Qualifier::Eq,
            "<" | "LT" => Qualifier::Lt,
            ">" | "GT" => Qualifier::Gt,
            "<=" | "LE" => Qualifier::Le,
            ">=" | "GE" => Qualifier::Ge,
            "~" | "AP" => Qualifier::Approx,
            "CA" => Qualifier::Calculated,
            other => {
                tracing::debug!(qualifier = other, "unrecognized qualifier");
                Qualifier::Problem
            }
        }
    }

    /// Symbol used when rendering.
    pub fn symbol(&self) -> &'static str {
        match self {
            Qualifier::Eq => "=",
            Qualifier::Lt => "<",
            Qualifier::Gt => ">",
            Qualifier::Le => "<=",
            Qualifier::Ge => ">=",
            Qualifier::Approx => "~",
            Qualifier::Calculated => "CA",
            Qualifier::Problem => "?",
        }
    }

    fn is_upper(self) -> bool {
        matches!(self, Qualifier::Lt | Qualifier::Le)
    }

    fn is_lower(self) -> bool {
        matches!(self, Qualifier::Gt | Qualifier::Ge)
    }

    /// Qualifier of a value computed from operands qualified `self` and `other`.
    pub fn compose(self, other: Qualifier) -> Qualifier {
        use Qualifier::*;

        match (self, other) {
            (Problem, _) | (_, Problem) => Problem,
            (Calculated, _) | (_, Calculated) => Calculated,
            (Eq, Eq) => Eq,
            (Approx, Approx) => Problem,
            (Eq, Approx) | (Approx, Eq) => Approx,
            (a, Approx) => a,
            (Approx, b) => b,
            (a, b) if (a == Eq || a.is_upper()) && (b == Eq || b.is_upper()) => Lt,
            (a, b) if (a == Eq || a.is_lower()) && (b == Eq || b.is_lower()) => Gt,
            _ => Problem,
        }
    }
}

impl std::fmt::Display for Qualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::Qualifier::*;
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Qualifier::parse(""), Eq);
        assert_eq!(Qualifier::parse(" < "), Lt);
        assert_eq!(Qualifier::parse("GE"), Ge);
        assert_eq!(Qualifier::parse("AP"), Approx);
        assert_eq!(Qualifier::parse("CA"), Calculated);
        assert_eq!(Qualifier::parse("SY"), Problem);
    }

    #[test]
    fn test_exact_composition_is_idempotent() {
        assert_eq!(Eq.compose(Eq), Eq);
    }

    #[test]
    fn test_bounds() {
        for upper in [Lt, Le] {
            assert_eq!(Eq.compose(upper), Lt);
            assert_eq!(upper.compose(Eq), Lt);
            for other in [Lt, Le] {
                assert_eq!(upper.compose(other), Lt);
            }
            for lower in [Gt, Ge] {
                assert_eq!(upper.compose(lower), Problem);
                assert_eq!(lower.compose(upper), Problem);
            }
        }
        for lower in [Gt, Ge] {
            assert_eq!(Eq.compose(lower), Gt);
            assert_eq!(lower.compose(Eq), Gt);
            assert_eq!(lower.compose(Ge), Gt);
        }
    }

    #[test]
    fn test_approximate() {
        assert_eq!(Eq.compose(Approx), Approx);
        assert_eq!(Approx.compose(Eq), Approx);
        assert_eq!(Lt.compose(Approx), Lt);
        assert_eq!(Ge.compose(Approx), Ge);
        assert_eq!(Approx.compose(Le), Le);
        assert_eq!(Approx.compose(Gt), Gt);
        assert_eq!(Approx.compose(Approx), Problem);
    }

    #[test]
    fn test_calculated_absorbs() {
        for q in [Eq, Lt, Gt, Le, Ge, Approx, Calculated] {
            assert_eq!(Calculated.compose(q), Calculated);
            assert_eq!(q.compose(Calculated), Calculated);
        }
    }

    #[test]
    fn test_problem_propagates() {
        for q in [Eq, Lt, Approx, Calculated, Problem] {
            assert_eq!(Problem.compose(q), Problem);
            assert_eq!(q.compose(Problem), Problem);
        }
    }
}
