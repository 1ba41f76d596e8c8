use crate::cache::RelationSlot;
use crate::error::Error;
use crate::executor::Executor;
use crate::materialize::{seqno, text, Entity, FromRow};
use crate::session::Ndlab;
use ndlab_core::{Quantity, Row};

use super::{level_filter, nuclide_filter, related, Level, Nuclide};

/// A photon line of a decaying level, summed over gammas and X-rays of the
/// same energy across every decay mode.
#[derive(Debug, Clone)]
pub struct PhotonTotal {
    pub parent_nucid: String,
    pub parent_l_seqno: i64,
    pub energy: Quantity,
    pub intensity: Quantity,
    /// `G` or `X`.
    pub kind: Option<String>,
    /// Number of decay modes in which the line is present.
    pub count: Option<i64>,
    filter: String,
    parent: RelationSlot<Vec<Nuclide>>,
    parent_level: RelationSlot<Vec<Level>>,
}

impl PhotonTotal {
    /// The parent nuclide.
    pub fn parent<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Nuclide, Error> {
        related(&mut self.parent, db, &nuclide_filter(&self.parent_nucid))
    }

    /// The decaying level.
    pub fn parent_level<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Level, Error> {
        related(
            &mut self.parent_level,
            db,
            &level_filter(&self.parent_nucid, self.parent_l_seqno),
        )
    }
}

impl Entity for PhotonTotal {
    fn primary_key(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.parent_nucid,
            self.parent_l_seqno,
            self.kind.as_deref().unwrap_or_default(),
            self.energy.nominal.as_deref().unwrap_or_default()
        )
    }

    fn source_filter(&self) -> &str {
        &self.filter
    }
}

impl FromRow for PhotonTotal {
    const ENTITY: &'static str = "DR_PHOTON_TOTAL";

    fn from_row(row: &Row, filter: &str) -> Self {
        Self {
            parent_nucid: text(row, "parent_nucid"),
            parent_l_seqno: seqno(row, "parent_l_seqno"),
            energy: Quantity::from_row(row, "energy"),
            intensity: Quantity::from_row(row, "intensity"),
            kind: row.text("type"),
            count: row.int("cnt"),
            filter: filter.to_string(),
            parent: RelationSlot::new(),
            parent_level: RelationSlot::new(),
        }
    }
}
