//! Lazily filled relation slots.
//!
//! Every navigable relation of a model instance owns a [`RelationSlot`]. A slot
//! is either empty or filled with the result of one filter. Asking again with
//! the same filter reuses the result; a different filter refills the slot.
//! Asking with [`FilterArg::Default`] keeps whatever filter the slot holds, so
//! a filter supplied once sticks until another one is given.

/// Filter requested for a relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterArg {
    /// No filter given: reuse the cached one, or none when empty.
    #[default]
    Default,
    /// An explicit filter expression.
    Given(String),
}

impl From<&str> for FilterArg {
    fn from(filter: &str) -> Self {
        FilterArg::Given(filter.to_string())
    }
}

impl From<String> for FilterArg {
    fn from(filter: String) -> Self {
        FilterArg::Given(filter)
    }
}

impl From<Option<&str>> for FilterArg {
    fn from(filter: Option<&str>) -> Self {
        filter.map_or(FilterArg::Default, FilterArg::from)
    }
}

/// Cached result of one relation, keyed by the filter that produced it.
#[derive(Debug, Clone)]
pub struct RelationSlot<T> {
    state: Option<(String, T)>,
}

impl<T> Default for RelationSlot<T> {
    fn default() -> Self {
        Self { state: None }
    }
}

impl<T> RelationSlot<T> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter of the cached result, if filled.
    pub fn filter(&self) -> Option<&str> {
        self.state.as_ref().map(|(filter, _)| filter.as_str())
    }

    /// Whether the slot holds a result.
    pub fn is_filled(&self) -> bool {
        self.state.is_some()
    }

    /// The cached result, if filled.
    pub fn get(&self) -> Option<&T> {
        self.state.as_ref().map(|(_, value)| value)
    }

    /// Filter a request resolves to.
    pub fn resolve(&self, requested: &FilterArg) -> String {
        match requested {
            FilterArg::Given(filter) => filter.clone(),
            FilterArg::Default => self.filter().unwrap_or_default().to_string(),
        }
    }

    /// Return the cached result for `requested`, filling the slot first if it
    /// is empty or was filled with a different filter.
    ///
    /// A failed fill leaves the slot empty.
    pub fn get_or_fill<E>(
        &mut self,
        requested: impl Into<FilterArg>,
        fill: impl FnOnce(&str) -> Result<T, E>,
    ) -> Result<&T, E> {
        let filter = self.resolve(&requested.into());
        let entry = match self.state.take() {
            Some((cached, value)) if cached == filter => (cached, value),
            _ => {
                tracing::debug!(filter = %filter, "filling relation");
                let value = fill(&filter)?;
                (filter, value)
            }
        };
        Ok(&self.state.insert(entry).1)
    }

    /// Drop the cached result.
    pub fn clear(&mut self) {
        self.state = None;
    }
}

/// Combine a caller filter with the foreign-key filter of a relation.
///
/// The caller filter must be a plain condition; a trailing `ORDER BY` belongs
/// to the foreign-key filter.
pub fn join_filters(filter: &str, fk_filter: &str) -> String {
    let filter = filter.trim();
    if filter.is_empty() {
        fk_filter.trim().to_string()
    } else {
        format!("( {} ) AND {}", filter, fk_filter.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counted(calls: &Cell<usize>) -> impl Fn(&str) -> Result<String, ()> + '_ {
        move |filter| {
            calls.set(calls.get() + 1);
            Ok(format!("rows for [{filter}]"))
        }
    }

    #[test]
    fn test_same_filter_fills_once() {
        let calls = Cell::new(0);
        let mut slot = RelationSlot::new();

        slot.get_or_fill("LEVEL.ENERGY > 100", counted(&calls)).unwrap();
        slot.get_or_fill("LEVEL.ENERGY > 100", counted(&calls)).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(slot.filter(), Some("LEVEL.ENERGY > 100"));
    }

    #[test]
    fn test_new_filter_refills_and_sticks() {
        let calls = Cell::new(0);
        let mut slot = RelationSlot::new();

        slot.get_or_fill("LEVEL.ENERGY > 100", counted(&calls)).unwrap();
        let second = slot
            .get_or_fill("LEVEL.ENERGY > 500", counted(&calls))
            .unwrap()
            .clone();
        assert_eq!(calls.get(), 2);

        let sticky = slot.get_or_fill(FilterArg::Default, counted(&calls)).unwrap();
        assert_eq!(sticky, &second);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_default_on_empty_slot_uses_no_filter() {
        let calls = Cell::new(0);
        let mut slot = RelationSlot::new();

        let value = slot.get_or_fill(FilterArg::Default, counted(&calls)).unwrap();
        assert_eq!(value, "rows for []");
        assert_eq!(slot.filter(), Some(""));

        slot.get_or_fill("", counted(&calls)).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_failed_fill_leaves_slot_empty() {
        let mut slot: RelationSlot<String> = RelationSlot::new();
        slot.get_or_fill("A", |_| Ok::<_, ()>("a".to_string())).unwrap();

        let result = slot.get_or_fill("B", |_| Err::<String, _>("boom"));
        assert_eq!(result, Err("boom"));
        assert!(!slot.is_filled());
    }

    #[test]
    fn test_join_filters() {
        assert_eq!(
            join_filters("", "LEVEL.NUC_ID = '135XE' ORDER BY LEVEL.SEQNO"),
            "LEVEL.NUC_ID = '135XE' ORDER BY LEVEL.SEQNO"
        );
        assert_eq!(
            join_filters(" LEVEL.ENERGY > 100 ", "LEVEL.NUC_ID = '135XE'"),
            "( LEVEL.ENERGY > 100 ) AND LEVEL.NUC_ID = '135XE'"
        );
    }

    #[test]
    fn test_filter_arg_conversions() {
        assert_eq!(FilterArg::from(None::<&str>), FilterArg::Default);
        assert_eq!(
            FilterArg::from(Some("GAMMA.ENERGY > 1")),
            FilterArg::Given("GAMMA.ENERGY > 1".to_string())
        );
        assert_eq!(FilterArg::default(), FilterArg::Default);
    }
}
