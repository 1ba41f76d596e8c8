use crate::cache::{join_filters, FilterArg, RelationSlot};
use crate::error::Error;
use crate::executor::Executor;
use crate::materialize::{seqno, text, Entity, FromRow};
use crate::session::Ndlab;
use ndlab_core::{Quantity, Row};
use std::collections::HashMap;

use super::{
    level_filter, nuclide_filter, related, DecayGamma, DecayRadiation, Level, Nuclide,
    PhotonTotal, RadiationKind,
};

/// One decay mode of a level.
#[derive(Debug, Clone)]
pub struct LevelDecay {
    /// Parent nuclide.
    pub nucid: String,
    /// Sequence number of the decaying level.
    pub l_seqno: i64,
    /// Decay mode, see the `DECAY_*` constants.
    pub decay_code: i64,
    pub daughter_nucid: String,
    pub z: Option<i64>,
    pub n: Option<i64>,
    pub z_dau: Option<i64>,
    pub n_dau: Option<i64>,
    /// Decay probability per 100 decays of the parent.
    pub perc: Quantity,
    pub q_togs: Quantity,
    /// Total recoil energy.
    pub recoil: Quantity,
    filter: String,
    nuclide: RelationSlot<Vec<Nuclide>>,
    level: RelationSlot<Vec<Level>>,
    daughter: RelationSlot<Vec<Nuclide>>,
    mode: RelationSlot<Vec<DecayMode>>,
    radiations: HashMap<RadiationKind, RelationSlot<Vec<DecayRadiation>>>,
    gammas: RelationSlot<Vec<DecayGamma>>,
    photon_totals: RelationSlot<Vec<PhotonTotal>>,
}

impl LevelDecay {
    /// Filter selecting the level decay with the given key.
    pub fn key_filter(nucid: &str, l_seqno: i64, decay_code: i64) -> String {
        format!(
            "L_DECAY.NUC_ID = '{nucid}' AND L_DECAY.LEVEL_SEQNO = {l_seqno} AND L_DECAY.MODE = {decay_code}"
        )
    }

    /// The parent nuclide.
    pub fn nuclide<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Nuclide, Error> {
        related(&mut self.nuclide, db, &nuclide_filter(&self.nucid))
    }

    /// The decaying level.
    pub fn level<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Level, Error> {
        related(&mut self.level, db, &level_filter(&self.nucid, self.l_seqno))
    }

    /// The daughter nuclide.
    pub fn daughter<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Nuclide, Error> {
        related(&mut self.daughter, db, &nuclide_filter(&self.daughter_nucid))
    }

    /// Name and description of the decay mode.
    pub fn mode<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&DecayMode, Error> {
        related(&mut self.mode, db, &format!("DECAY_MODE.CODE = {}", self.decay_code))
    }

    /// Radiations of one kind emitted by this decay, by energy.
    pub fn radiations<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        kind: RadiationKind,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayRadiation], Error> {
        let fk = self.radiation_filter(kind);
        self.radiations
            .entry(kind)
            .or_default()
            .get_or_fill(filter, |f| db.radiations(kind, &join_filters(f, &fk)))
            .map(Vec::as_slice)
    }

    /// Alpha radiations.
    pub fn alphas<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayRadiation], Error> {
        self.radiations(db, RadiationKind::Alpha, filter)
    }

    /// Beta radiations of either sign.
    pub fn betas<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayRadiation], Error> {
        self.radiations(db, RadiationKind::Beta, filter)
    }

    /// Beta- radiations.
    pub fn betas_minus<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayRadiation], Error> {
        self.radiations(db, RadiationKind::BetaMinus, filter)
    }

    /// Beta+ radiations.
    pub fn betas_plus<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayRadiation], Error> {
        self.radiations(db, RadiationKind::BetaPlus, filter)
    }

    /// Anti-neutrinos.
    pub fn anti_neutrinos<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayRadiation], Error> {
        self.radiations(db, RadiationKind::AntiNeutrino, filter)
    }

    /// Neutrinos of the beta+ branch. See [`DecayRadiation::with_capture_branches`]
    /// for the electron-capture lines.
    pub fn neutrinos<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayRadiation], Error> {
        self.radiations(db, RadiationKind::Neutrino, filter)
    }

    /// X-rays.
    pub fn xrays<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayRadiation], Error> {
        self.radiations(db, RadiationKind::X, filter)
    }

    /// Conversion electrons.
    pub fn conversion_electrons<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayRadiation], Error> {
        self.radiations(db, RadiationKind::ConversionElectron, filter)
    }

    /// Auger electrons.
    pub fn augers<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayRadiation], Error> {
        self.radiations(db, RadiationKind::Auger, filter)
    }

    /// Annihilation photons.
    pub fn annihilations<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayRadiation], Error> {
        self.radiations(db, RadiationKind::Annihilation, filter)
    }

    /// Delayed particles.
    pub fn delayed<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayRadiation], Error> {
        self.radiations(db, RadiationKind::Delayed, filter)
    }

    /// Gammas emitted by this decay.
    pub fn gammas<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[DecayGamma], Error> {
        let fk = self.gamma_filter();
        self.gammas
            .get_or_fill(filter, |f| db.fetch(&join_filters(f, &fk)))
            .map(Vec::as_slice)
    }

    /// Photon lines of the decaying level, gammas and X-rays summed per energy.
    pub fn photon_totals<E: Executor>(
        &mut self,
        db: &Ndlab<E>,
        filter: impl Into<FilterArg>,
    ) -> Result<&[PhotonTotal], Error> {
        let fk = format!(
            "DR_PHOTON_TOTAL.PARENT_NUC_ID = '{}' AND DR_PHOTON_TOTAL.PARENT_LEVEL_SEQNO = {} ORDER BY DR_PHOTON_TOTAL.ENERGY",
            self.nucid, self.l_seqno
        );
        self.photon_totals
            .get_or_fill(filter, |f| db.fetch(&join_filters(f, &fk)))
            .map(Vec::as_slice)
    }

    /// Energy carried by one radiation kind per 100 decays of the parent.
    ///
    /// Reads the lines afresh; the cached [`LevelDecay::radiations`] and its
    /// filter are left alone.
    pub fn total_radiation_energy<E: Executor>(
        &self,
        db: &Ndlab<E>,
        kind: RadiationKind,
    ) -> Result<Quantity, Error> {
        let lines = db.radiations(kind, &self.radiation_filter(kind))?;
        Ok(radiated_energy(lines.iter().map(|r| (&r.energy, &r.intensity))))
    }

    /// Energy released per 100 decays of the parent: every emitted radiation,
    /// the electron-capture neutrinos and the recoil, scaled by the gamma
    /// normalisation factor.
    pub fn total_measured_energy<E: Executor>(&self, db: &Ndlab<E>) -> Result<Quantity, Error> {
        let mut parts = Vec::new();

        for kind in RadiationKind::EMITTED {
            let lines = db.radiations(kind, &self.radiation_filter(kind))?;
            parts.push(radiated_energy(lines.iter().map(|r| (&r.energy, &r.intensity))));
            if kind == RadiationKind::Neutrino {
                let branches: Vec<DecayRadiation> =
                    lines.iter().filter_map(DecayRadiation::capture_branch).collect();
                parts.push(radiated_energy(
                    branches.iter().map(|r| (&r.energy, &r.intensity)),
                ));
            }
        }

        let gammas: Vec<DecayGamma> = db.fetch(&self.gamma_filter())?;
        parts.push(radiated_energy(
            gammas.iter().map(|g| (&g.gamma.energy, &g.intensity)),
        ));
        parts.push(self.recoil.clone());

        Ok(Quantity::sum(&parts).multiply(self.normalisation()))
    }

    /// Gamma normalisation factor; 1 when not reported.
    pub fn normalisation(&self) -> Quantity {
        if self.q_togs.measured().is_some() {
            self.q_togs.clone()
        } else {
            Quantity::from(1.0)
        }
    }

    fn radiation_filter(&self, kind: RadiationKind) -> String {
        let entity = kind.entity();
        format!(
            "{entity}.PARENT_NUC_ID = '{}' AND {entity}.PARENT_LEVEL_SEQNO = {} AND {entity}.MODE = {} ORDER BY {entity}.ENERGY",
            self.nucid, self.l_seqno, self.decay_code
        )
    }

    fn gamma_filter(&self) -> String {
        format!(
            "DR_GAMMA.PARENT_NUC_ID = '{}' AND DR_GAMMA.PARENT_LEVEL_SEQNO = {} AND DR_GAMMA.MODE = {} ORDER BY DR_GAMMA.SEQNO",
            self.nucid, self.l_seqno, self.decay_code
        )
    }
}

/// Σ energy × intensity / 100 over radiation lines; zero for no lines.
pub fn radiated_energy<'a>(
    lines: impl IntoIterator<Item = (&'a Quantity, &'a Quantity)>,
) -> Quantity {
    let terms: Vec<Quantity> = lines
        .into_iter()
        .map(|(energy, intensity)| energy.multiply(intensity))
        .collect();
    Quantity::sum(&terms).divide(100.0)
}

impl Entity for LevelDecay {
    fn primary_key(&self) -> String {
        format!("{}-{}-{}", self.nucid, self.l_seqno, self.decay_code)
    }

    fn source_filter(&self) -> &str {
        &self.filter
    }
}

impl FromRow for LevelDecay {
    const ENTITY: &'static str = "L_DECAY";

    fn from_row(row: &Row, filter: &str) -> Self {
        Self {
            nucid: text(row, "nucid"),
            l_seqno: seqno(row, "l_seqno"),
            decay_code: seqno(row, "decay_code"),
            daughter_nucid: text(row, "daughter_nucid"),
            z: row.int("z"),
            n: row.int("n"),
            z_dau: row.int("z_dau"),
            n_dau: row.int("n_dau"),
            perc: Quantity::from_row(row, "perc"),
            q_togs: Quantity::from_row(row, "q_togs"),
            recoil: Quantity::from_row(row, "recoil_tot_en"),
            filter: filter.to_string(),
            nuclide: RelationSlot::new(),
            level: RelationSlot::new(),
            daughter: RelationSlot::new(),
            mode: RelationSlot::new(),
            radiations: HashMap::new(),
            gammas: RelationSlot::new(),
            photon_totals: RelationSlot::new(),
        }
    }
}

/// A decay mode code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecayMode {
    pub code: i64,
    pub name: String,
    pub desc: Option<String>,
    filter: String,
}

impl Entity for DecayMode {
    fn primary_key(&self) -> String {
        self.code.to_string()
    }

    fn source_filter(&self) -> &str {
        &self.filter
    }
}

impl FromRow for DecayMode {
    const ENTITY: &'static str = "DECAY_MODE";

    fn from_row(row: &Row, filter: &str) -> Self {
        Self {
            code: seqno(row, "code"),
            name: text(row, "mode"),
            desc: row.text("desc"),
            filter: filter.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radiated_energy() {
        let lines = [
            (Quantity::new(100.0, 1.0), Quantity::new(50.0, 0.0)),
            (Quantity::new(200.0, 0.0), Quantity::new(25.0, 0.0)),
        ];
        let total = radiated_energy(lines.iter().map(|(e, i)| (e, i)));

        assert!((total.value - 100.0).abs() < 1e-9);
        assert!((total.uncertainty - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_radiated_energy_of_nothing() {
        let total = radiated_energy(std::iter::empty());
        assert_eq!(total.value, 0.0);
        assert_eq!(total.uncertainty, 0.0);
    }

    #[test]
    fn test_normalisation_defaults_to_one() {
        let row = Row::new().with("nucid", "135XE").with("q_togs", 0.5);
        assert_eq!(LevelDecay::from_row(&row, "").normalisation().value, 0.5);

        let row = Row::new()
            .with("nucid", "135XE")
            .with("q_togs", ndlab_core::RawValue::Null);
        assert_eq!(LevelDecay::from_row(&row, "").normalisation().value, 1.0);
    }

    #[test]
    fn test_key_filter() {
        assert_eq!(
            LevelDecay::key_filter("60CO", 0, 2),
            "L_DECAY.NUC_ID = '60CO' AND L_DECAY.LEVEL_SEQNO = 0 AND L_DECAY.MODE = 2"
        );
    }
}
