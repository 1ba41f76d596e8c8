use crate::cache::RelationSlot;
use crate::error::Error;
use crate::executor::Executor;
use crate::materialize::{seqno, text, Entity, FromRow};
use crate::session::Ndlab;
use ndlab_core::{Quantity, Row};

use super::{level_filter, nuclide_filter, related, Level, LevelDecay, Nuclide};

/// Kind of a decay radiation, one catalog entity each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadiationKind {
    Alpha,
    /// Beta of either sign; rows resolve to [`RadiationKind::BetaMinus`] or
    /// [`RadiationKind::BetaPlus`].
    Beta,
    BetaMinus,
    BetaPlus,
    AntiNeutrino,
    Neutrino,
    Delayed,
    X,
    ConversionElectron,
    Auger,
    Annihilation,
    /// Any radiation, without a kind condition.
    Any,
}

impl RadiationKind {
    /// Kinds that carry energy away from the decay.
    pub const EMITTED: [RadiationKind; 9] = [
        RadiationKind::X,
        RadiationKind::ConversionElectron,
        RadiationKind::Auger,
        RadiationKind::Alpha,
        RadiationKind::BetaMinus,
        RadiationKind::BetaPlus,
        RadiationKind::Neutrino,
        RadiationKind::AntiNeutrino,
        RadiationKind::Annihilation,
    ];

    /// Catalog entity of the kind.
    pub fn entity(self) -> &'static str {
        match self {
            RadiationKind::Alpha => "DR_ALPHA",
            RadiationKind::Beta => "DR_BETA",
            RadiationKind::BetaMinus => "DR_BETAM",
            RadiationKind::BetaPlus => "DR_BETAP",
            RadiationKind::AntiNeutrino => "DR_ANTI_NU",
            RadiationKind::Neutrino => "DR_NU",
            RadiationKind::Delayed => "DR_DELAYED",
            RadiationKind::X => "DR_X",
            RadiationKind::ConversionElectron => "DR_CONV_EL",
            RadiationKind::Auger => "DR_AUGER",
            RadiationKind::Annihilation => "DR_ANNIHIL",
            RadiationKind::Any => "DECAY_RADIATION",
        }
    }

    /// Kind of a stored radiation from its type columns.
    ///
    /// Neutrinos share their rows with the betas, so a stored row always
    /// classifies as the charged particle.
    pub fn classify(type_a: &str, type_b: &str) -> Self {
        match (type_a, type_b) {
            ("A", _) => RadiationKind::Alpha,
            ("B-", _) => RadiationKind::BetaMinus,
            ("B+", _) => RadiationKind::BetaPlus,
            ("DN" | "DP" | "DA", _) => RadiationKind::Delayed,
            ("G", "X") => RadiationKind::X,
            ("G", "AN") => RadiationKind::Annihilation,
            ("E", "CE") => RadiationKind::ConversionElectron,
            ("E", "AU") => RadiationKind::Auger,
            _ => RadiationKind::Any,
        }
    }
}

/// Fields specific to a radiation kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RadiationDetail {
    None,
    Alpha {
        hindrance: Quantity,
    },
    Beta {
        logft: Quantity,
        trans_type: Option<String>,
        endpoint: Quantity,
        /// Mean energy of the accompanying (anti-)neutrino.
        neutrino_energy: Quantity,
        /// Electron-capture quantities, beta+ only.
        capture: Option<Capture>,
    },
    Neutrino {
        /// Neutrino energy of the electron-capture branch.
        ec_energy: Quantity,
        ec_intensity: Quantity,
    },
    Delayed {
        /// `DN`, `DP` or `DA`.
        particle: Option<String>,
        energy_x: Quantity,
    },
    Atomic {
        /// Atomic shell in IUPAC notation.
        shell: Option<String>,
    },
}

/// Electron-capture quantities of a beta+ transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub ec_energy: Quantity,
    pub bpec_intensity: Quantity,
    pub ec_intensity: Quantity,
}

/// A radiation emitted in a decay.
#[derive(Debug, Clone)]
pub struct DecayRadiation {
    pub kind: RadiationKind,
    pub r_seqno: i64,
    pub parent_nucid: String,
    pub parent_l_seqno: i64,
    pub daughter_nucid: String,
    /// Level of the daughter fed by the decay.
    pub daughter_l_seqno: i64,
    pub decay_code: i64,
    pub type_a: Option<String>,
    pub type_b: Option<String>,
    pub type_c: Option<String>,
    pub energy: Quantity,
    pub intensity: Quantity,
    pub detail: RadiationDetail,
    filter: String,
    parent: RelationSlot<Vec<Nuclide>>,
    parent_level: RelationSlot<Vec<Level>>,
    daughter: RelationSlot<Vec<Nuclide>>,
    fed_level: RelationSlot<Vec<Level>>,
    decay: RelationSlot<Vec<LevelDecay>>,
}

impl DecayRadiation {
    /// Build a radiation of a known kind from a row of its entity.
    pub fn from_kind_row(kind: RadiationKind, row: &Row, filter: &str) -> Self {
        let kind = match kind {
            RadiationKind::Beta => RadiationKind::classify(&text(row, "type_a"), ""),
            kind => kind,
        };
        let energy_column = match kind {
            RadiationKind::Neutrino | RadiationKind::AntiNeutrino => "energy_nu",
            _ => "energy",
        };

        Self {
            kind,
            r_seqno: seqno(row, "r_seqno"),
            parent_nucid: text(row, "parent_nucid"),
            parent_l_seqno: seqno(row, "parent_l_seqno"),
            daughter_nucid: text(row, "daughter_nucid"),
            daughter_l_seqno: seqno(row, "adopted_daughter_l_seqno"),
            decay_code: seqno(row, "decay_code"),
            type_a: row.text("type_a"),
            type_b: row.text("type_b"),
            type_c: row.text("type_c"),
            energy: Quantity::from_row(row, energy_column),
            intensity: Quantity::from_row(row, "intensity"),
            detail: detail(kind, row),
            filter: filter.to_string(),
            parent: RelationSlot::new(),
            parent_level: RelationSlot::new(),
            daughter: RelationSlot::new(),
            fed_level: RelationSlot::new(),
            decay: RelationSlot::new(),
        }
    }

    /// The electron-capture line accompanying a beta+ neutrino, if any was
    /// reported. It carries the capture energy and intensity in place of the
    /// beta+ ones.
    pub fn capture_branch(&self) -> Option<DecayRadiation> {
        match &self.detail {
            RadiationDetail::Neutrino {
                ec_energy,
                ec_intensity,
            } if ec_energy.is_reported() => {
                let mut branch = self.clone();
                branch.energy = ec_energy.clone();
                branch.intensity = ec_intensity.clone();
                Some(branch)
            }
            _ => None,
        }
    }

    /// Neutrinos followed by their electron-capture lines.
    pub fn with_capture_branches(neutrinos: &[DecayRadiation]) -> Vec<DecayRadiation> {
        let branches: Vec<_> = neutrinos.iter().filter_map(Self::capture_branch).collect();
        neutrinos.iter().cloned().chain(branches).collect()
    }

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

    /// The daughter nuclide.
    pub fn daughter<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Nuclide, Error> {
        related(&mut self.daughter, db, &nuclide_filter(&self.daughter_nucid))
    }

    /// The daughter level fed by the decay.
    pub fn fed_level<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&Level, Error> {
        related(
            &mut self.fed_level,
            db,
            &level_filter(&self.daughter_nucid, self.daughter_l_seqno),
        )
    }

    /// The level decay emitting the radiation.
    pub fn decay<E: Executor>(&mut self, db: &Ndlab<E>) -> Result<&LevelDecay, Error> {
        let filter =
            LevelDecay::key_filter(&self.parent_nucid, self.parent_l_seqno, self.decay_code);
        related(&mut self.decay, db, &filter)
    }
}

fn beta(row: &Row, neutrino_energy: Quantity, capture: Option<Capture>) -> RadiationDetail {
    RadiationDetail::Beta {
        logft: Quantity::from_row(row, "b_logft"),
        trans_type: row.text("b_trans_type"),
        endpoint: Quantity::from_row(row, "b_endpoint"),
        neutrino_energy,
        capture,
    }
}

fn detail(kind: RadiationKind, row: &Row) -> RadiationDetail {
    match kind {
        RadiationKind::Alpha => RadiationDetail::Alpha {
            hindrance: Quantity::from_row(row, "a_hindrance"),
        },
        RadiationKind::BetaMinus => beta(row, Quantity::from_row(row, "energy_nu"), None),
        RadiationKind::BetaPlus => beta(
            row,
            Quantity::from_row(row, "energy_nu"),
            Some(Capture {
                ec_energy: Quantity::from_row(row, "ec_energy"),
                bpec_intensity: Quantity::from_row(row, "bpec_intensity"),
                ec_intensity: Quantity::from_row(row, "ec_intensity"),
            }),
        ),
        RadiationKind::Neutrino => RadiationDetail::Neutrino {
            ec_energy: Quantity::from_row(row, "ec_energy"),
            ec_intensity: Quantity::from_row(row, "ec_intensity"),
        },
        RadiationKind::Delayed => RadiationDetail::Delayed {
            particle: row.text("type_a"),
            energy_x: Quantity::from_row(row, "d_energy_x"),
        },
        RadiationKind::X | RadiationKind::ConversionElectron | RadiationKind::Auger => {
            RadiationDetail::Atomic {
                shell: row.text("type_c"),
            }
        }
        RadiationKind::Beta
        | RadiationKind::AntiNeutrino
        | RadiationKind::Annihilation
        | RadiationKind::Any => RadiationDetail::None,
    }
}

impl Entity for DecayRadiation {
    fn primary_key(&self) -> String {
        self.r_seqno.to_string()
    }

    fn source_filter(&self) -> &str {
        &self.filter
    }
}

impl FromRow for DecayRadiation {
    const ENTITY: &'static str = "DECAY_RADIATION";

    fn from_row(row: &Row, filter: &str) -> Self {
        let kind = RadiationKind::classify(&text(row, "type_a"), &text(row, "type_b"));
        Self::from_kind_row(kind, row, filter)
    }
}
