//! Entities of the nuclear-data store.

use super::entity::EntityDef;
use super::field::{FieldDef, FieldKind};
use super::registry::Catalog;
use super::relation::RelationDef;

/// Build the complete nuclear-data catalog.
pub(crate) fn nuclear_data() -> Catalog {
    Catalog::new()
        .with_entity(nuclide())
        .with_entity(level())
        .with_entity(decay_mode())
        .with_entity(level_decay())
        .with_entity(gamma())
        .with_entity(decay_gamma())
        .with_entity(radiation("DECAY_RADIATION", None, "any decay radiation"))
        .with_entity(alpha())
        .with_entity(beta_any())
        .with_entity(beta_minus())
        .with_entity(beta_plus())
        .with_entity(anti_neutrino())
        .with_entity(neutrino())
        .with_entity(delayed())
        .with_entity(atomic(
            "DR_X",
            "type_a = 'G' and type_b='X'",
            "X decay radiation",
        ))
        .with_entity(atomic(
            "DR_CONV_EL",
            "type_a = 'E' and type_b='CE'",
            "conversion electron radiation",
        ))
        .with_entity(atomic(
            "DR_AUGER",
            "type_a = 'E' and type_b='AU'",
            "Auger electron radiation",
        ))
        .with_entity(radiation(
            "DR_ANNIHIL",
            Some("type_a = 'G' and type_b='AN'"),
            "gamma from annihilation",
        ))
        .with_entity(photon_total())
        .with_entity(fission_yield("CUM_FY", "cum_fy", "cfy", "cumulative fission yields"))
        .with_entity(fission_yield("IND_FY", "ind_fy", "ify", "independent fission yields"))
}

fn nuclide_link(name: &str, alias: &str, local: &str, description: &str) -> RelationDef {
    RelationDef::new(name, "NUCLIDE")
        .with_alias(alias)
        .on(local, "nucid")
        .with_description(description)
}

fn level_link(
    name: &str,
    alias: &str,
    seqno: &str,
    nucid: &str,
    description: &str,
) -> RelationDef {
    RelationDef::new(name, "LEVEL")
        .with_alias(alias)
        .on(seqno, "l_seqno")
        .on(nucid, "nucid")
        .with_description(description)
}

fn nuclide() -> EntityDef {
    EntityDef::new("NUCLIDE", "nuclides")
        .with_description("properties of the nuclide in its ground state")
        .with_field(FieldDef::scalar("Z", "z").with_description("number of protons"))
        .with_field(FieldDef::scalar("N", "n").with_description("number of neutrons"))
        .with_field(FieldDef::text("NUC_ID", "nucid").with_description("identifier, e.g. 135XE"))
        .with_field(
            FieldDef::text("ELEM_SYMBOL", "elem_symbol").with_description("symbol of the element"),
        )
        .with_quantity(
            "CHARGE_RADIUS",
            "charge_radius",
            "root-mean-square of the nuclear charge radius [fm]",
        )
        .with_quantity("ATOMIC_MASS", "atomic_mass", "atomic mass [micro AMU]")
        .with_quantity("MASS_EXCESS", "mass_excess", "mass excess [keV]")
        .with_quantity("BINDING_EN", "binding_en", "binding energy per nucleon [keV]")
        .with_quantity(
            "BETA_DECAY_EN",
            "beta_decay_en",
            "energy available for beta decay [keV]",
        )
        .with_quantity("S2N", "s2n", "2-neutron separation energy [keV]")
        .with_quantity("S2P", "s2p", "2-proton separation energy [keV]")
        .with_quantity("QA", "qa", "alpha decay Q energy [keV]")
        .with_quantity("QBMN", "qbmn", "beta- + n decay energy [keV]")
        .with_quantity("SN", "sn", "neutron separation energy [keV]")
        .with_quantity("SP", "sp", "proton separation energy [keV]")
        .with_quantity("QEC", "qec", "electron capture Q-value [keV]")
        .with_quantity_without_limit(
            "ABUNDANCE",
            "abundance",
            "natural abundance, in mole fraction",
        )
}

fn level() -> EntityDef {
    EntityDef::new("LEVEL", "levels")
        .with_description("properties of the energy states of a nuclide")
        .with_relation(nuclide_link(
            "NUC",
            "lev_nuc",
            "nucid",
            "the nuclide, e.g. LEVEL.NUC.Z",
        ))
        .with_field(
            FieldDef::scalar("SEQNO", "l_seqno")
                .with_description("sequential number of the level, ground state = 0"),
        )
        .with_quantity("ENERGY", "energy", "level energy [keV]")
        .with_quantity(
            "HALF_LIFE",
            "half_life",
            "half-life as given in the evaluation, see HALF_LIFE_UNITS",
        )
        .with_field(
            FieldDef::text("HALF_LIFE_UNITS", "half_life_units")
                .with_description("units of the HALF_LIFE field"),
        )
        .with_quantity_without_limit("HALF_LIFE_SEC", "half_life_sec", "half-life [s]")
        .with_field(FieldDef::text("JP", "jp_str").with_description("Jp as given in the evaluation"))
        .with_field(FieldDef::text("J", "j").with_description("J value as assigned in RIPL"))
        .with_field(FieldDef::scalar("P", "parity").with_description("parity as assigned in RIPL"))
        .with_field(
            FieldDef::scalar("JP_ORDER", "jp_order")
                .with_description("order of the Jp, 1 is the first occurrence"),
        )
        .with_field(
            FieldDef::scalar("JP_REASON", "jp_reason")
                .with_description("strength of the Jp assignment, see JP_* constants"),
        )
        .with_field(
            FieldDef::scalar("JP_METHOD", "jp_method")
                .with_description("RIPL method for assigning the Jp, see RIPL_J_* constants"),
        )
        .with_quantity(
            "QUADRUPOLE_EM",
            "quadrupole_em",
            "electric quadrupole moment [b]",
        )
        .with_quantity(
            "DIPOLE_MM",
            "dipole_mm",
            "magnetic dipole moment [nuclear magnetons]",
        )
        .with_field(
            FieldDef::text("QUESTIONABLE", "questionable")
                .with_description("the existence of the level is questionable"),
        )
        .with_field(
            FieldDef::text("CONFIGURATION", "configuration")
                .with_description("nuclear configuration"),
        )
        .with_field(FieldDef::text("ISOSPIN", "isospin").with_description("isospin"))
        .with_field(FieldDef::text("NUC_ID", "nucid"))
}

fn decay_mode() -> EntityDef {
    EntityDef::new("DECAY_MODE", "decay_modes")
        .with_description("decay mode codes")
        .with_field(FieldDef::text("NAME", "mode").with_description("name of the decay mode"))
        .with_field(FieldDef::scalar("CODE", "code").with_description("code, see DECAY_* constants"))
        .with_field(FieldDef::text("DESC", "desc").with_description("description"))
}

fn level_decay() -> EntityDef {
    EntityDef::new("L_DECAY", "l_decays")
        .with_description("properties of a decay mode of a level")
        .with_relation(nuclide_link(
            "NUC",
            "dec_p_nuc",
            "nucid",
            "the parent nuclide, e.g. L_DECAY.NUC.Z",
        ))
        .with_relation(level_link(
            "LEVEL",
            "dec_p_lev",
            "l_seqno",
            "nucid",
            "the decaying level, e.g. L_DECAY.LEVEL.ENERGY",
        ))
        .with_relation(nuclide_link(
            "DAUGHTER",
            "dec_d_nuc",
            "daughter_nucid",
            "the daughter nuclide, e.g. L_DECAY.DAUGHTER.Z",
        ))
        .with_field(
            FieldDef::scalar("MODE", "decay_code")
                .with_description("code of the decay, see DECAY_* constants"),
        )
        .with_quantity(
            "PERC",
            "perc",
            "decay probability per 100 decays of the parent",
        )
        .with_quantity_without_limit(
            "Q_TOGS",
            "q_togs",
            "Q-value of the decay, including the parent level energy",
        )
        .with_field(FieldDef::text("NUC_ID", "nucid"))
        .with_field(FieldDef::scalar("LEVEL_SEQNO", "l_seqno"))
        .with_field(FieldDef::text("DAUGHTER_NUC_ID", "daughter_nucid"))
}

/// Fields shared by level gammas and decay gammas.
fn transition(entity: EntityDef) -> EntityDef {
    entity
        .with_relation(level_link(
            "START_LEVEL",
            "gam_lev_s",
            "l_seqno",
            "nucid",
            "the start level, e.g. GAMMA.START_LEVEL.ENERGY",
        ))
        .with_relation(level_link(
            "END_LEVEL",
            "gam_lev_e",
            "final_l_seqno",
            "nucid",
            "the end level, e.g. GAMMA.END_LEVEL.ENERGY",
        ))
        .with_field(
            FieldDef::scalar("SEQNO", "g_seqno")
                .with_description("sequential number of the gamma within its start level"),
        )
        .with_quantity("ENERGY", "energy", "energy [keV]")
        .with_quantity(
            "REL_PHOTON_INTENS",
            "rel_photon_intens",
            "relative photon intensity [%], summing to 100 over one start level",
        )
        .with_field(FieldDef::text("MULTIPOLARITY", "multipolarity").with_description("multipolarity"))
        .with_quantity("MIXING_RATIO", "mixing_ratio", "mixing ratio")
        .with_quantity(
            "TOT_CONV_COEFF",
            "tot_conv_coeff",
            "total conversion coefficient",
        )
        .with_quantity(
            "BEW",
            "bew",
            "reduced electric transition probability [Weisskopf units]",
        )
        .with_field(FieldDef::scalar("BEW_ORDER", "bew_order").with_description("order of the transition"))
        .with_quantity(
            "BMW",
            "bmw",
            "reduced magnetic transition probability [Weisskopf units]",
        )
        .with_field(FieldDef::scalar("BMW_ORDER", "bmw_order").with_description("order of the transition"))
        .with_field(
            FieldDef::text("QUESTIONABLE", "questionable")
                .with_description("the existence is questionable"),
        )
        .with_field(FieldDef::scalar("START_LEVEL_SEQNO", "l_seqno"))
        .with_field(FieldDef::scalar("END_LEVEL_SEQNO", "final_l_seqno"))
}

fn gamma() -> EntityDef {
    transition(
        EntityDef::new("GAMMA", "gammas")
            .with_description("properties of a nuclide electromagnetic transition"),
    )
    .with_relation(nuclide_link(
        "NUC",
        "gam_nuc",
        "nucid",
        "the nuclide, e.g. GAMMA.NUC.Z",
    ))
    .with_field(FieldDef::text("NUC_ID", "nucid"))
}

fn decay_gamma() -> EntityDef {
    transition(EntityDef::new("DR_GAMMA", "dr_gammas").with_description("gamma decay radiation"))
        .with_relation(nuclide_link(
            "PARENT",
            "drg_nuc_p",
            "parent_nucid",
            "the parent nuclide, e.g. DR_GAMMA.PARENT.Z",
        ))
        .with_relation(level_link(
            "PARENT_LEVEL",
            "drg_lev_p",
            "parent_l_seqno",
            "parent_nucid",
            "the parent level, e.g. DR_GAMMA.PARENT_LEVEL.ENERGY",
        ))
        .with_field(
            FieldDef::scalar("MODE", "decay_code")
                .with_description("code of the decay, see DECAY_* constants"),
        )
        .with_quantity("INTENSITY", "intensity", "intensity per 100 decays of the parent")
        .with_field(FieldDef::text("PARENT_NUC_ID", "parent_nucid"))
        .with_field(FieldDef::scalar("PARENT_LEVEL_SEQNO", "parent_l_seqno"))
}

/// A radiation kind stored in `decay_radiations`.
fn radiation(name: &str, condition: Option<&str>, description: &str) -> EntityDef {
    let entity = EntityDef::new(name, "decay_radiations")
        .with_description(description)
        .with_relation(nuclide_link(
            "PARENT",
            "dr_nuc_p",
            "parent_nucid",
            "the parent nuclide, e.g. DR_ALPHA.PARENT.Z",
        ))
        .with_relation(level_link(
            "PARENT_LEVEL",
            "dr_lev_p",
            "parent_l_seqno",
            "parent_nucid",
            "the parent level, e.g. DR_ALPHA.PARENT_LEVEL.ENERGY",
        ))
        .with_relation(nuclide_link(
            "DAUGHTER",
            "dr_nuc_d",
            "daughter_nucid",
            "the daughter nuclide, e.g. DR_ALPHA.DAUGHTER.Z",
        ))
        .with_relation(level_link(
            "DAUGHTER_FED_LEVEL",
            "dr_lev_d",
            "adopted_daughter_l_seqno",
            "daughter_nucid",
            "the daughter level fed by the decay, e.g. DR_ALPHA.DAUGHTER_FED_LEVEL.ENERGY",
        ))
        .with_field(
            FieldDef::scalar("MODE", "decay_code")
                .with_description("code of the decay, see DECAY_* constants"),
        )
        .with_quantity(
            "INTENSITY",
            "intensity",
            "absolute intensity per 100 decays of the parent",
        )
        .with_quantity("ENERGY", "energy", "energy of the radiation [keV]")
        .with_field(FieldDef::text("PARENT_NUC_ID", "parent_nucid"))
        .with_field(FieldDef::scalar("PARENT_LEVEL_SEQNO", "parent_l_seqno"))
        .with_field(FieldDef::text("DAUGHTER_NUC_ID", "daughter_nucid"))
        .with_field(FieldDef::scalar(
            "DAUGHTER_FED_LEVEL_SEQNO",
            "adopted_daughter_l_seqno",
        ));
    match condition {
        Some(condition) => entity.with_condition(condition),
        None => entity,
    }
}

fn alpha() -> EntityDef {
    radiation("DR_ALPHA", Some("type_a='A'"), "alpha decay radiation")
        .with_quantity("HINDRANCE", "a_hindrance", "hindrance factor")
}

fn beta(name: &str, condition: &str, description: &str) -> EntityDef {
    radiation(name, Some(condition), description)
        .with_quantity("LOGFT", "b_logft", "log ft")
        .with_field(
            FieldDef::text("TRANS_TYPE", "b_trans_type")
                .with_description("transition type, see TRANS_* constants"),
        )
        .with_quantity("ENDPOINT", "b_endpoint", "end-point energy [keV]")
}

fn beta_any() -> EntityDef {
    beta(
        "DR_BETA",
        "type_a in ('B-','B+')",
        "beta decay radiation, either sign",
    )
}

fn beta_minus() -> EntityDef {
    beta("DR_BETAM", "type_a='B-'", "beta- decay radiation")
}

fn beta_plus() -> EntityDef {
    beta("DR_BETAP", "type_a='B+'", "beta+ decay radiation")
        .with_quantity(
            "EC_ENERGY",
            "ec_energy",
            "energy available for electron capture [keV]",
        )
        .with_quantity(
            "BPEC_INTENSITY",
            "bpec_intensity",
            "electron capture plus beta+ intensity per 100 decays of the parent",
        )
        .with_quantity(
            "EC_INTENSITY",
            "ec_intensity",
            "electron capture intensity per 100 decays of the parent",
        )
}

/// Neutrino energies live in `energy_nu` instead of `energy`.
fn with_neutrino_energy(entity: EntityDef) -> EntityDef {
    FieldDef::quantity("ENERGY", "energy_nu", "neutrino energy [keV]")
        .into_iter()
        .fold(entity, EntityDef::replace_field)
}

fn anti_neutrino() -> EntityDef {
    with_neutrino_energy(radiation(
        "DR_ANTI_NU",
        Some("type_a='B-'"),
        "anti-neutrino decay radiation",
    ))
}

fn neutrino() -> EntityDef {
    with_neutrino_energy(radiation(
        "DR_NU",
        Some("type_a='B+'"),
        "neutrino decay radiation",
    ))
    .with_quantity_without_limit(
        "ENERGY_EC",
        "ec_energy",
        "neutrino energy of the electron capture branch [keV]",
    )
    .with_quantity(
        "INTENSITY_EC",
        "ec_intensity",
        "electron capture intensity per 100 decays of the parent",
    )
}

fn delayed() -> EntityDef {
    radiation(
        "DR_DELAYED",
        Some("type_a in ('DN','DP','DA')"),
        "delayed particle emission",
    )
    .with_field(
        FieldDef::text("TYPE", "type_a")
            .with_description("delayed particle, see DELAY_* constants"),
    )
    .with_quantity(
        "ENERGY_X",
        "d_energy_x",
        "energy of the intermediate state before the particle emission [keV]",
    )
}

fn atomic(name: &str, condition: &str, description: &str) -> EntityDef {
    radiation(name, Some(condition), description).with_field(
        FieldDef::text("SHELL", "type_c")
            .with_description("atomic shell in IUPAC notation, see SHELL_* constants"),
    )
}

fn photon_total() -> EntityDef {
    EntityDef::new("DR_PHOTON_TOTAL", "dr_photon_totals")
        .with_description("photon decay radiation, gamma and X summed per energy")
        .with_relation(nuclide_link(
            "PARENT",
            "pt_nuc_p",
            "parent_nucid",
            "the parent nuclide, e.g. DR_PHOTON_TOTAL.PARENT.Z",
        ))
        .with_relation(level_link(
            "PARENT_LEVEL",
            "pt_lev_p",
            "parent_l_seqno",
            "parent_nucid",
            "the parent level, e.g. DR_PHOTON_TOTAL.PARENT_LEVEL.ENERGY",
        ))
        .with_quantity_without_limit("ENERGY", "energy", "energy [keV]")
        .with_quantity_without_limit(
            "INTENSITY",
            "intensity",
            "intensity per 100 decays of the parent",
        )
        .with_field(
            FieldDef::scalar("COUNT", "cnt")
                .with_description("number of parent decay modes in which the line is present"),
        )
        .with_field(FieldDef::text("TYPE", "type").with_description("X or G"))
        .with_field(FieldDef::text("PARENT_NUC_ID", "parent_nucid"))
        .with_field(FieldDef::scalar("PARENT_LEVEL_SEQNO", "parent_l_seqno"))
}

fn fission_yield(name: &str, table: &str, prefix: &str, description: &str) -> EntityDef {
    EntityDef::new(name, table)
        .with_description(description)
        .with_relation(nuclide_link(
            "PARENT",
            &format!("{prefix}_nuc_p"),
            "parent_nucid",
            "the fissioning nuclide",
        ))
        .with_relation(nuclide_link(
            "PRODUCT",
            &format!("{prefix}_nuc_d"),
            "daughter_nucid",
            "the product nuclide",
        ))
        .with_relation(level_link(
            "PARENT_LEVEL",
            &format!("{prefix}_lev_p"),
            "l_seqno",
            "parent_nucid",
            "the fissioning level",
        ))
        .with_quantity_without_limit("THER_YIELD", "ther_yield", "thermal neutron yield")
        .with_quantity_without_limit("FAST_YIELD", "fast_yield", "fast neutron yield")
        // `fast_yield` holds the reported text, `fast_yield_num` its number
        .replace_field(
            FieldDef::new("FAST_YIELD", "fast_yield_num", FieldKind::Quantity)
                .with_description("fast neutron yield"),
        )
        .with_quantity_without_limit("MEV_14_YIELD", "mev_14_yield", "14 MeV neutron yield")
        .with_field(FieldDef::text("PARENT_NUC_ID", "parent_nucid"))
        .with_field(FieldDef::text("PRODUCT_NUC_ID", "daughter_nucid"))
        .with_field(FieldDef::scalar("PARENT_LEVEL_SEQNO", "l_seqno"))
}
