use crate::cache::RelationSlot;
use crate::error::Error;
use crate::executor::Executor;
use crate::materialize::{seqno, text, Entity};
use crate::session::Ndlab;
use ndlab_core::{Quantity, Row};

use super::{level_filter, nuclide_filter, related, Level, Nuclide};

/// Cumulative or independent fission yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YieldKind {
    Cumulative,
    Independent,
}

impl YieldKind {
    /// Catalog entity of the kind.
    pub fn entity(self) -> &'static str {
        match self {
            YieldKind::Cumulative => "CUM_FY",
            YieldKind::Independent => "IND_FY",
        }
    }
}

/// Yield of one product in the fission of a parent.
#[derive(Debug, Clone)]
pub struct FissionYield {
    pub kind: YieldKind,
    /// The fissioning nuclide.
    pub parent_nucid: String,
    pub product_nucid: String,
    /// Sequence number of the fissioning level.
    pub l_seqno: i64,
    /// Thermal neutron yield.
    pub thermal: Quantity,
    /// Fast neutron yield.
    pub fast: Quantity,
    /// 14 MeV neutron yield.
    pub mev_14: Quantity,
    filter: String,
    parent: RelationSlot<Vec<Nuclide>>,
    parent_level: RelationSlot<Vec<Level>>,
    product: RelationSlot<Vec<Nuclide>>,
}

impl FissionYield {
    /// Build a yield of a known kind from a row of its entity.
    pub fn from_kind_row(kind: YieldKind, row: &Row, filter: &str) -> Self {
        Self {
            kind,
            parent_nucid: text(row, "parent_nucid"),
            product_nucid: text(row, "daughter_nucid"),
            l_seqno: seqno(row, "l_seqno"),
            thermal: Quantity::from_row(row, "ther_yield"),
            fast: Quantity::from_row(row, "fast_yield"),
            mev_14: Quantity::from_row(row, "mev_14_yield"),
            filter: filter.to_string(),
            parent: RelationSlot::new(),
            parent_level: RelationSlot::new(),
            product: RelationSlot::new(),
        }
    }

    /// The fissioning nuclide.
    pub fn parent<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Nuclide, Error> {
        related(&mut self.parent, db, &nuclide_filter(&self.parent_nucid))
    }

    /// The fissioning level.
    pub fn parent_level<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Level, Error> {
        related(
            &mut self.parent_level,
            db,
            &level_filter(&self.parent_nucid, self.l_seqno),
        )
    }

    /// The product nuclide.
    pub fn product<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Nuclide, Error> {
        related(&mut self.product, db, &nuclide_filter(&self.product_nucid))
    }
}

impl Entity for FissionYield {
    fn primary_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.parent_nucid, self.product_nucid, self.l_seqno
        )
    }

    fn source_filter(&self) -> &str {
        &self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kind_row() {
        let row = Row::new()
            .with("parent_nucid", "235U")
            .with("daughter_nucid", "135XE")
            .with("l_seqno", 0)
            .with("ther_yield", 0.0654)
            .with("ther_yield_unc", 0.0013)
            .with("fast_yield", "None");
        let fy = FissionYield::from_kind_row(YieldKind::Cumulative, &row, "");

        assert_eq!(fy.primary_key(), "235U-135XE-0");
        assert_eq!(fy.thermal.value, 0.0654);
        assert_eq!(fy.thermal.uncertainty, 0.0013);
        assert!(!fy.fast.is_reported());
        assert_eq!(YieldKind::Independent.entity(), "IND_FY");
    }
}
