//! Measured quantities with first-order uncertainty propagation.

use super::qualifier::Qualifier;
use crate::row::Row;
use serde::Serialize;
use std::cmp::Ordering;

/// A measured value: number, standard uncertainty and qualifier.
///
/// `value` is always a number; a quantity with nothing reported holds 0 and
/// has no `nominal`. Use [`Quantity::is_reported`] or [`Quantity::measured`]
/// to tell a defaulted zero from a measured one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    /// Raw text as reported, if any.
    pub nominal: Option<String>,
    /// Numeric value, 0 when nothing was reported.
    pub value: f64,
    /// Standard uncertainty, 0 when not reported.
    pub uncertainty: f64,
    /// Qualifier of the value.
    pub qualifier: Qualifier,
}

impl Quantity {
    /// Create a quantity from a value and its uncertainty.
    pub fn new(value: f64, uncertainty: f64) -> Self {
        Self {
            nominal: Some(value.to_string()),
            value,
            uncertainty,
            qualifier: Qualifier::Eq,
        }
    }

    /// A quantity with no reported value.
    pub fn absent() -> Self {
        Self {
            nominal: None,
            value: 0.0,
            uncertainty: 0.0,
            qualifier: Qualifier::Eq,
        }
    }

    /// Set the qualifier.
    pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = qualifier;
        self
    }

    /// Populate from the `<column>`, `<column>_unc` and `<column>_limit` columns of a row.
    pub fn from_row(row: &Row, column: &str) -> Self {
        let mut quantity = Self::absent();

        if let Some(raw) = row.get(column) {
            quantity.nominal = raw.as_text();
            if let Some(value) = raw.as_f64() {
                quantity.value = value;
            }
        }
        quantity.uncertainty = row.float(&format!("{column}_unc")).unwrap_or(0.0);
        if let Some(limit) = row.text(&format!("{column}_limit")) {
            quantity.qualifier = Qualifier::parse(&limit);
        }

        quantity
    }

    /// Whether a value was reported at all.
    pub fn is_reported(&self) -> bool {
        self.nominal.is_some()
    }

    /// The reported number, if the nominal text is numeric.
    pub fn measured(&self) -> Option<f64> {
        self.nominal.as_deref()?.trim().parse().ok()
    }

    /// Relative uncertainty; `None` for a zero value.
    pub fn relative_uncertainty(&self) -> Option<f64> {
        (self.value != 0.0).then(|| (self.uncertainty / self.value).abs())
    }

    fn derived(&self, rhs: &Quantity, value: f64, uncertainty: f64) -> Quantity {
        Quantity::new(value, uncertainty).with_qualifier(self.qualifier.compose(rhs.qualifier))
    }

    /// Sum of two quantities.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, rhs: impl Into<Quantity>) -> Quantity {
        let rhs = rhs.into();
        self.derived(
            &rhs,
            self.value + rhs.value,
            self.uncertainty.hypot(rhs.uncertainty),
        )
    }

    /// Difference of two quantities.
    pub fn subtract(&self, rhs: impl Into<Quantity>) -> Quantity {
        let rhs = rhs.into();
        self.derived(
            &rhs,
            self.value - rhs.value,
            self.uncertainty.hypot(rhs.uncertainty),
        )
    }

    /// Product of two quantities.
    pub fn multiply(&self, rhs: impl Into<Quantity>) -> Quantity {
        let rhs = rhs.into();
        let uncertainty = (rhs.value * self.uncertainty).hypot(self.value * rhs.uncertainty);
        self.derived(&rhs, self.value * rhs.value, uncertainty)
    }

    /// Quotient of two quantities. Division by zero follows IEEE semantics.
    pub fn divide(&self, rhs: impl Into<Quantity>) -> Quantity {
        let rhs = rhs.into();
        let value = self.value / rhs.value;
        let uncertainty = (self.uncertainty / rhs.value)
            .hypot(self.value * rhs.uncertainty / (rhs.value * rhs.value));
        self.derived(&rhs, value, uncertainty)
    }

    /// `self` raised to `exponent`.
    pub fn pow(&self, exponent: impl Into<Quantity>) -> Quantity {
        let exponent = exponent.into();
        let value = self.value.powf(exponent.value);

        let from_base = if self.uncertainty == 0.0 {
            0.0
        } else {
            exponent.value * self.value.powf(exponent.value - 1.0) * self.uncertainty
        };
        let from_exponent = if exponent.uncertainty == 0.0 {
            0.0
        } else {
            value * self.value.ln() * exponent.uncertainty
        };

        self.derived(&exponent, value, from_base.hypot(from_exponent))
    }

    /// Sum of many quantities; an empty sequence sums to an exact zero.
    pub fn sum<'a>(quantities: impl IntoIterator<Item = &'a Quantity>) -> Quantity {
        quantities
            .into_iter()
            .fold(Quantity::new(0.0, 0.0), |acc, q| acc.add(q))
    }

    /// Order by value only. Qualifiers and uncertainties are ignored.
    pub fn compare(&self, other: impl Into<Quantity>) -> Option<Ordering> {
        self.value.partial_cmp(&other.into().value)
    }

    /// `self < other` by value.
    pub fn lt(&self, other: impl Into<Quantity>) -> bool {
        self.compare(other) == Some(Ordering::Less)
    }

    /// `self > other` by value.
    pub fn gt(&self, other: impl Into<Quantity>) -> bool {
        self.compare(other) == Some(Ordering::Greater)
    }

    /// `self <= other` by value.
    pub fn le(&self, other: impl Into<Quantity>) -> bool {
        matches!(self.compare(other), Some(Ordering::Less | Ordering::Equal))
    }

    /// `self >= other` by value.
    pub fn ge(&self, other: impl Into<Quantity>) -> bool {
        matches!(self.compare(other), Some(Ordering::Greater | Ordering::Equal))
    }

    /// Same value and same uncertainty. Qualifiers are ignored.
    pub fn equals(&self, other: impl Into<Quantity>) -> bool {
        let other = other.into();
        self.value == other.value && self.uncertainty == other.uncertainty
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::absent()
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::new(value, 0.0)
    }
}

impl From<&Quantity> for Quantity {
    fn from(quantity: &Quantity) -> Self {
        quantity.clone()
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.qualifier != Qualifier::Eq {
            write!(f, "{} ", self.qualifier)?;
        }
        write!(f, "{}+/-{}", self.value, self.uncertainty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::RawValue;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_from_row() {
        let row = Row::new()
            .with("energy", 661.657)
            .with("energy_unc", 0.003)
            .with("energy_limit", "");
        let q = Quantity::from_row(&row, "energy");

        assert!(q.is_reported());
        assert!(close(q.value, 661.657));
        assert!(close(q.uncertainty, 0.003));
        assert_eq!(q.qualifier, Qualifier::Eq);
    }

    #[test]
    fn test_from_row_absent_value() {
        let row = Row::new()
            .with("half_life", RawValue::Null)
            .with("half_life_unc", RawValue::Null)
            .with("half_life_limit", "GT");
        let q = Quantity::from_row(&row, "half_life");

        assert!(!q.is_reported());
        assert_eq!(q.measured(), None);
        assert_eq!(q.value, 0.0);
        assert_eq!(q.uncertainty, 0.0);
        assert_eq!(q.qualifier, Qualifier::Gt);
    }

    #[test]
    fn test_non_numeric_nominal_defaults_to_zero() {
        let row = Row::new().with("half_life", "STABLE");
        let q = Quantity::from_row(&row, "half_life");

        assert_eq!(q.nominal.as_deref(), Some("STABLE"));
        assert_eq!(q.value, 0.0);
        assert_eq!(q.measured(), None);
    }

    #[test]
    fn test_add_subtract_round_trip() {
        let a = Quantity::new(10.0, 0.3);
        let b = Quantity::new(4.0, 0.4);
        let back = a.add(&b).subtract(&b);

        assert!(close(back.value, a.value));
        assert!(back.uncertainty >= a.uncertainty);
        assert!(close(a.add(&b).uncertainty, 0.5));
    }

    #[test]
    fn test_multiply_divide() {
        let a = Quantity::new(10.0, 0.1);
        let b = Quantity::new(2.0, 0.04);

        let product = a.multiply(&b);
        assert!(close(product.value, 20.0));
        // relative: sqrt(0.01^2 + 0.02^2)
        assert!(close(product.uncertainty, 20.0 * (0.0001f64 + 0.0004).sqrt()));

        let quotient = a.divide(&b);
        assert!(close(quotient.value, 5.0));
        assert!(close(quotient.uncertainty, 5.0 * (0.0001f64 + 0.0004).sqrt()));
    }

    #[test]
    fn test_scalar_operands() {
        let a = Quantity::new(3.0, 0.2);
        let scaled = a.multiply(2.0);
        assert!(close(scaled.value, 6.0));
        assert!(close(scaled.uncertainty, 0.4));
        assert!(close(a.divide(100.0).value, 0.03));
    }

    #[test]
    fn test_pow() {
        let a = Quantity::new(3.0, 0.1);
        let squared = a.pow(2.0);
        assert!(close(squared.value, 9.0));
        assert!(close(squared.uncertainty, 2.0 * 3.0 * 0.1));

        let exact = Quantity::new(2.0, 0.0).pow(Quantity::new(3.0, 0.0));
        assert!(close(exact.value, 8.0));
        assert_eq!(exact.uncertainty, 0.0);
    }

    #[test]
    fn test_qualifier_composition_in_arithmetic() {
        let bound = Quantity::new(5.0, 0.0).with_qualifier(Qualifier::Lt);
        let exact = Quantity::new(1.0, 0.1);
        assert_eq!(bound.add(&exact).qualifier, Qualifier::Lt);

        let lower = Quantity::new(1.0, 0.0).with_qualifier(Qualifier::Gt);
        assert_eq!(bound.add(&lower).qualifier, Qualifier::Problem);
        assert_eq!(exact.multiply(2.0).qualifier, Qualifier::Eq);
    }

    #[test]
    fn test_compare_ignores_qualifier() {
        let a = Quantity::new(1.0, 0.5).with_qualifier(Qualifier::Gt);
        let b = Quantity::new(2.0, 0.1);

        assert!(a.lt(&b));
        assert!(b.gt(&a));
        assert!(a.le(1.0));
        assert!(a.ge(1.0));
        assert!(!a.equals(1.0));
        assert!(Quantity::new(1.0, 0.0).equals(1.0));
    }

    #[test]
    fn test_sum() {
        let parts = [Quantity::new(1.0, 0.3), Quantity::new(2.0, 0.4)];
        let total = Quantity::sum(&parts);
        assert!(close(total.value, 3.0));
        assert!(close(total.uncertainty, 0.5));
        assert_eq!(Quantity::sum(Vec::<Quantity>::new().iter()).value, 0.0);
    }
}
