use crate::cache::RelationSlot;
use crate::error::Error;
use crate::executor::Executor;
use crate::materialize::{seqno, text, Entity, FromRow};
use crate::session::Ndlab;
use ndlab_core::{Quantity, Row};

use super::{level_filter, nuclide_filter, related, Level, LevelDecay, Nuclide};

/// An electromagnetic transition between two levels.
#[derive(Debug, Clone)]
pub struct Gamma {
    pub nucid: String,
    /// Sequence number of the start level.
    pub l_seqno: i64,
    /// Sequence number of the gamma within its start level.
    pub g_seqno: i64,
    /// Sequence number of the end level.
    pub final_l_seqno: i64,
    pub z: Option<i64>,
    pub n: Option<i64>,
    pub energy: Quantity,
    pub rel_photon_intens: Quantity,
    pub multipolarity: Option<String>,
    pub mixing_ratio: Quantity,
    pub tot_conv_coeff: Quantity,
    pub bew: Quantity,
    pub bew_order: Option<i64>,
    pub bmw: Quantity,
    pub bmw_order: Option<i64>,
    pub questionable: Option<String>,
    filter: String,
    nuclide: RelationSlot<Vec<Nuclide>>,
    start_level: RelationSlot<Vec<Level>>,
    end_level: RelationSlot<Vec<Level>>,
}

impl Gamma {
    /// The nuclide the gamma belongs to.
    pub fn nuclide<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Nuclide, Error> {
        related(&mut self.nuclide, db, &nuclide_filter(&self.nucid))
    }

    /// The level the gamma de-excites.
    pub fn start_level<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Level, Error> {
        related(&mut self.start_level, db, &level_filter(&self.nucid, self.l_seqno))
    }

    /// The level the gamma feeds.
    pub fn end_level<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Level, Error> {
        related(&mut self.end_level, db, &level_filter(&self.nucid, self.final_l_seqno))
    }
}

impl Entity for Gamma {
    fn primary_key(&self) -> String {
        format!("{}-{}-{}", self.nucid, self.l_seqno, self.g_seqno)
    }

    fn source_filter(&self) -> &str {
        &self.filter
    }
}

impl FromRow for Gamma {
    const ENTITY: &'static str = "GAMMA";

    fn from_row(row: &Row, filter: &str) -> Self {
        Self {
            nucid: text(row, "nucid"),
            l_seqno: seqno(row, "l_seqno"),
            g_seqno: seqno(row, "g_seqno"),
            final_l_seqno: seqno(row, "final_l_seqno"),
            z: row.int("z"),
            n: row.int("n"),
            energy: Quantity::from_row(row, "energy"),
            rel_photon_intens: Quantity::from_row(row, "rel_photon_intens"),
            multipolarity: row.text("multipolarity"),
            mixing_ratio: Quantity::from_row(row, "mixing_ratio"),
            tot_conv_coeff: Quantity::from_row(row, "tot_conv_coeff"),
            bew: Quantity::from_row(row, "bew"),
            bew_order: row.int("bew_order"),
            bmw: Quantity::from_row(row, "bmw"),
            bmw_order: row.int("bmw_order"),
            questionable: row.text("questionable"),
            filter: filter.to_string(),
            nuclide: RelationSlot::new(),
            start_level: RelationSlot::new(),
            end_level: RelationSlot::new(),
        }
    }
}

/// A gamma emitted in the decay of a parent level.
///
/// Carries the transition in the daughter plus the absolute intensity per
/// 100 decays of the parent.
#[derive(Debug, Clone)]
pub struct DecayGamma {
    /// The transition in the daughter nuclide.
    pub gamma: Gamma,
    pub parent_nucid: String,
    pub parent_l_seqno: i64,
    pub decay_code: i64,
    pub intensity: Quantity,
    parent: RelationSlot<Vec<Nuclide>>,
    parent_level: RelationSlot<Vec<Level>>,
    decay: RelationSlot<Vec<LevelDecay>>,
}

impl DecayGamma {
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

    /// The level decay that emits the gamma.
    pub fn decay<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&LevelDecay, Error> {
        let filter =
            LevelDecay::key_filter(&self.parent_nucid, self.parent_l_seqno, self.decay_code);
        related(&mut self.decay, db, &filter)
    }
}

impl Entity for DecayGamma {
    fn primary_key(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.parent_nucid,
            self.parent_l_seqno,
            self.decay_code,
            self.gamma.primary_key()
        )
    }

    fn source_filter(&self) -> &str {
        self.gamma.source_filter()
    }
}

impl FromRow for DecayGamma {
    const ENTITY: &'static str = "DR_GAMMA";

    fn from_row(row: &Row, filter: &str) -> Self {
        Self {
            gamma: Gamma::from_row(row, filter),
            parent_nucid: text(row, "parent_nucid"),
            parent_l_seqno: seqno(row, "parent_l_seqno"),
            decay_code: seqno(row, "decay_code"),
            intensity: Quantity::from_row(row, "intensity"),
            parent: RelationSlot::new(),
            parent_level: RelationSlot::new(),
            decay: RelationSlot::new(),
        }
    }
}
