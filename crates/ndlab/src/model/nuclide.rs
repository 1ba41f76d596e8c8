use crate::cache::{join_filters, FilterArg, RelationSlot};
use crate::chain;
use crate::error::Error;
use crate::executor::Executor;
use crate::materialize::{remove_duplicates, seqno, text, Entity, FromRow};
use crate::session::Ndlab;
use ndlab_core::{Quantity, Row};

use super::{level_filter, related, Gamma, Level, LevelDecay};

/// Ground-state properties of a nuclide.
#[derive(Debug, Clone)]
pub struct Nuclide {
    pub nucid: String,
    pub z: i64,
    pub n: i64,
    pub elem_symbol: String,
    pub charge_radius: Quantity,
    pub atomic_mass: Quantity,
    pub mass_excess: Quantity,
    pub binding_en: Quantity,
    pub beta_decay_en: Quantity,
    pub s2n: Quantity,
    pub s2p: Quantity,
    pub qa: Quantity,
    pub qbmn: Quantity,
    pub sn: Quantity,
    pub sp: Quantity,
    pub qec: Quantity,
    pub abundance: Quantity,
    filter: String,
    levels: RelationSlot<Vec<Level>>,
    ground_state: RelationSlot<Vec<Level>>,
    gammas: RelationSlot<Vec<Gamma>>,
    decays: RelationSlot<Vec<LevelDecay>>,
    daughters: RelationSlot<Vec<Nuclide>>,
    parents: RelationSlot<Vec<Nuclide>>,
}

impl Nuclide {
    /// Mass number.
    pub fn a(&self) -> i64 {
        self.z + self.n
    }

    /// Levels of the nuclide, by sequence number.
    pub fn levels<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[Level], Error> {
        let fk = format!("LEVEL.NUC_ID = '{}' ORDER BY LEVEL.SEQNO", self.nucid);
        self.levels
            .get_or_fill(filter, |f| db.fetch(&join_filters(f, &fk)))
            .map(Vec::as_slice)
    }

    /// The ground-state level.
    pub fn ground_state<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Level, Error> {
        related(&mut self.ground_state, db, &level_filter(&self.nucid, 0))
    }

    /// Gammas of the nuclide, by start level and sequence number.
    pub fn gammas<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[Gamma], Error> {
        let fk = format!(
            "GAMMA.NUC_ID = '{}' ORDER BY GAMMA.START_LEVEL_SEQNO , GAMMA.SEQNO",
            self.nucid
        );
        self.gammas
            .get_or_fill(filter, |f| db.fetch(&join_filters(f, &fk)))
            .map(Vec::as_slice)
    }

    /// Decays of every level of the nuclide.
    pub fn decays<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[LevelDecay], Error> {
        let fk = format!(
            "L_DECAY.NUC_ID = '{}' ORDER BY L_DECAY.LEVEL_SEQNO , L_DECAY.MODE",
            self.nucid
        );
        self.decays
            .get_or_fill(filter, |f| db.fetch(&join_filters(f, &fk)))
            .map(Vec::as_slice)
    }

    /// Direct daughters of any level of the nuclide.
    pub fn daughters<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&[Nuclide], Error> {
        let fk = format!("L_DECAY.NUC_ID = '{}'", self.nucid);
        self.daughters
            .get_or_fill(FilterArg::Default, |_| {
                db.fetch_as("L_DECAY.DAUGHTER.ALL", &fk).map(remove_duplicates)
            })
            .map(Vec::as_slice)
    }

    /// Direct parents of the nuclide.
    pub fn parents<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&[Nuclide], Error> {
        let fk = format!("L_DECAY.DAUGHTER_NUC_ID = '{}'", self.nucid);
        self.parents
            .get_or_fill(FilterArg::Default, |_| {
                db.fetch_as("L_DECAY.NUC.ALL", &fk).map(remove_duplicates)
            })
            .map(Vec::as_slice)
    }

    /// Every nuclide reachable by successive decays.
    pub fn daughters_chain<E: Executor>(&self, db: &Ndlab<E>) -> Result<Vec<Nuclide>, Error> {
        let ids = chain::expand(&self.nucid, |nucid| {
            related_ids(db, "L_DECAY.DAUGHTER_NUC_ID", "L_DECAY.NUC_ID", "daughter_nucid", nucid)
        })?;
        nuclides_by_id(db, &ids)
    }

    /// Every nuclide whose decays lead to this one.
    pub fn parents_chain<E: Executor>(&self, db: &Ndlab<E>) -> Result<Vec<Nuclide>, Error> {
        let ids = chain::expand(&self.nucid, |nucid| {
            related_ids(db, "L_DECAY.NUC_ID", "L_DECAY.DAUGHTER_NUC_ID", "nucid", nucid)
        })?;
        nuclides_by_id(db, &ids)
    }
}

/// Distinct values of `field` over the level decays where `key` is `nucid`.
fn related_ids<E: Executor>(
    db: &Ndlab<E>,
    field: &str,
    key: &str,
    column: &str,
    nucid: &str,
) -> Result<Vec<String>, Error> {
    let rows = db.query(field, &format!("{key} = '{nucid}'"))?;
    let mut ids: Vec<String> = Vec::new();
    for id in rows.iter().filter_map(|row| row.text(column)) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Nuclides in the order of `ids`; identifiers missing from the store are skipped.
fn nuclides_by_id<E: Executor>(db: &Ndlab<E>, ids: &[String]) -> Result<Vec<Nuclide>, Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let quoted: Vec<String> = ids.iter().map(|id| format!("'{id}'")).collect();
    let filter = format!("NUCLIDE.NUC_ID in ( {} )", quoted.join(" , "));
    let found: Vec<Nuclide> = db.fetch(&filter)?;

    Ok(ids
        .iter()
        .filter_map(|id| found.iter().find(|n| &n.nucid == id).cloned())
        .collect())
}

impl Entity for Nuclide {
    fn primary_key(&self) -> String {
        self.nucid.clone()
    }

    fn source_filter(&self) -> &str {
        &self.filter
    }
}

impl FromRow for Nuclide {
    const ENTITY: &'static str = "NUCLIDE";

    fn from_row(row: &Row, filter: &str) -> Self {
        Self {
            nucid: text(row, "nucid"),
            z: seqno(row, "z"),
            n: seqno(row, "n"),
            elem_symbol: text(row, "elem_symbol"),
            charge_radius: Quantity::from_row(row, "charge_radius"),
            atomic_mass: Quantity::from_row(row, "atomic_mass"),
            mass_excess: Quantity::from_row(row, "mass_excess"),
            binding_en: Quantity::from_row(row, "binding_en"),
            beta_decay_en: Quantity::from_row(row, "beta_decay_en"),
            s2n: Quantity::from_row(row, "s2n"),
            s2p: Quantity::from_row(row, "s2p"),
            qa: Quantity::from_row(row, "qa"),
            qbmn: Quantity::from_row(row, "qbmn"),
            sn: Quantity::from_row(row, "sn"),
            sp: Quantity::from_row(row, "sp"),
            qec: Quantity::from_row(row, "qec"),
            abundance: Quantity::from_row(row, "abundance"),
            filter: filter.to_string(),
            levels: RelationSlot::new(),
            ground_state: RelationSlot::new(),
            gammas: RelationSlot::new(),
            decays: RelationSlot::new(),
            daughters: RelationSlot::new(),
            parents: RelationSlot::new(),
        }
    }
}
