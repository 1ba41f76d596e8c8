use crate::cache::{join_filters, FilterArg, RelationSlot};
use crate::error::Error;
use crate::executor::Executor;
use crate::materialize::{remove_duplicates, seqno, text, Entity, FromRow};
use crate::session::Ndlab;
use ndlab_core::{Quantity, Row};

use super::{nuclide_filter, related, Gamma, LevelDecay, Nuclide};

/// An energy state of a nuclide.
#[derive(Debug, Clone)]
pub struct Level {
    pub nucid: String,
    /// Sequence number within the nuclide, 0 for the ground state.
    pub l_seqno: i64,
    pub z: Option<i64>,
    pub n: Option<i64>,
    pub energy: Quantity,
    pub half_life: Quantity,
    pub half_life_units: Option<String>,
    pub half_life_sec: Quantity,
    /// Spin and parity as given in the evaluation.
    pub jp: Option<String>,
    pub j: Option<String>,
    pub parity: Option<i64>,
    pub jp_order: Option<i64>,
    pub jp_reason: Option<i64>,
    pub jp_method: Option<i64>,
    pub quadrupole_em: Quantity,
    pub dipole_mm: Quantity,
    pub questionable: Option<String>,
    pub configuration: Option<String>,
    pub isospin: Option<String>,
    filter: String,
    nuclide: RelationSlot<Vec<Nuclide>>,
    gammas: RelationSlot<Vec<Gamma>>,
    decays: RelationSlot<Vec<LevelDecay>>,
    daughters: RelationSlot<Vec<Nuclide>>,
}

impl Level {
    /// Whether this is the ground state.
    pub fn is_ground_state(&self) -> bool {
        self.l_seqno == 0
    }

    /// The nuclide the level belongs to.
    pub fn nuclide<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Nuclide, Error> {
        related(&mut self.nuclide, db, &nuclide_filter(&self.nucid))
    }

    /// Gammas de-exciting the level, by sequence number.
    pub fn gammas<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[Gamma], Error> {
        let fk = format!(
            "GAMMA.NUC_ID = '{}' AND GAMMA.START_LEVEL_SEQNO = {} ORDER BY GAMMA.SEQNO",
            self.nucid, self.l_seqno
        );
        self.gammas
            .get_or_fill(filter, |f| db.fetch(&join_filters(f, &fk)))
            .map(Vec::as_slice)
    }

    /// Decay modes of the level.
    pub fn decays<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[LevelDecay], Error> {
        let fk = format!(
            "L_DECAY.NUC_ID = '{}' AND L_DECAY.LEVEL_SEQNO = {} ORDER BY L_DECAY.MODE",
            self.nucid, self.l_seqno
        );
        self.decays
            .get_or_fill(filter, |f| db.fetch(&join_filters(f, &fk)))
            .map(Vec::as_slice)
    }

    /// Daughters of the decays of the level.
    pub fn daughters<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&[Nuclide], Error> {
        let fk = format!(
            "L_DECAY.NUC_ID = '{}' AND L_DECAY.LEVEL_SEQNO = {}",
            self.nucid, self.l_seqno
        );
        self.daughters
            .get_or_fill(FilterArg::Default, |_| {
                db.fetch_as("L_DECAY.DAUGHTER.ALL", &fk).map(remove_duplicates)
            })
            .map(Vec::as_slice)
    }
}

impl Entity for Level {
    fn primary_key(&self) -> String {
        format!("{}-{}", self.nucid, self.l_seqno)
    }

    fn source_filter(&self) -> &str {
        &self.filter
    }
}

impl FromRow for Level {
    const ENTITY: &'static str = "LEVEL";

    fn from_row(row: &Row, filter: &str) -> Self {
        Self {
            nucid: text(row, "nucid"),
            l_seqno: seqno(row, "l_seqno"),
            z: row.int("z"),
            n: row.int("n"),
            energy: Quantity::from_row(row, "energy"),
            half_life: Quantity::from_row(row, "half_life"),
            half_life_units: row.text("half_life_units"),
            half_life_sec: Quantity::from_row(row, "half_life_sec"),
            jp: row.text("jp_str"),
            j: row.text("j"),
            parity: row.int("parity"),
            jp_order: row.int("jp_order"),
            jp_reason: row.int("jp_reason"),
            jp_method: row.int("jp_method"),
            quadrupole_em: Quantity::from_row(row, "quadrupole_em"),
            dipole_mm: Quantity::from_row(row, "dipole_mm"),
            questionable: row.text("questionable"),
            configuration: row.text("configuration"),
            isospin: row.text("isospin"),
            filter: filter.to_string(),
            nuclide: RelationSlot::new(),
            gammas: RelationSlot::new(),
            decays: RelationSlot::new(),
            daughters: RelationSlot::new(),
        }
    }
}
