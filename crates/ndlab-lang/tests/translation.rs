//! End-to-end translation against the nuclear-data catalog.

use ndlab_core::Catalog;
use ndlab_lang::{translate, TranslateError, Translator};
use pretty_assertions::assert_eq;

fn translator() -> Translator<'static> {
    Translator::new(Catalog::global())
}

fn sql(fields: &str, filter: &str) -> String {
    translate(fields, filter).unwrap().to_sql()
}

#[test]
fn test_nuclide_by_id() {
    assert_eq!(
        sql("NUCLIDE.Z NUCLIDE.N NUCLIDE.NUC_ID", "NUCLIDE.NUC_ID = '135XE'"),
        "select nuclides.z nuclides.n nuclides.nucid from nuclides where nuclides.nucid = '135XE'"
    );
}

#[test]
fn test_start_level_relation() {
    let plan = translate("GAMMA.START_LEVEL.ENERGY", "").unwrap();

    assert_eq!(plan.select, "gam_lev_s.energy");
    assert_eq!(plan.tables, vec!["gammas", "levels as gam_lev_s"]);
    assert_eq!(
        plan.predicates,
        vec![
            "gammas.l_seqno = gam_lev_s.l_seqno",
            "gammas.nucid = gam_lev_s.nucid"
        ]
    );
}

#[test]
fn test_start_and_end_level_do_not_collide() {
    let plan = translate("GAMMA.START_LEVEL.ENERGY GAMMA.END_LEVEL.ENERGY", "").unwrap();

    assert_eq!(plan.select, "gam_lev_s.energy gam_lev_e.energy");
    assert!(plan
        .predicates
        .contains(&"gammas.final_l_seqno = gam_lev_e.l_seqno".to_string()));
    assert!(plan.rules.is_empty());
}

#[test]
fn test_radiation_kind_condition() {
    assert_eq!(
        sql(
            "DR_ALPHA.ENERGY DR_ALPHA.INTENSITY",
            "DR_ALPHA.PARENT_NUC_ID = '241AM' ORDER BY DR_ALPHA.ENERGY"
        ),
        "select decay_radiations.energy decay_radiations.intensity from decay_radiations \
         where type_a='A' and decay_radiations.parent_nucid = '241AM' \
         ORDER BY decay_radiations.energy"
    );
}

#[test]
fn test_wildcard_with_relation_filter() {
    assert_eq!(
        sql("LEVEL.*", "LEVEL.NUC.Z = 54 and LEVEL.SEQNO = 0"),
        "select distinct levels.* from levels, nuclides as lev_nuc \
         where levels.nucid = lev_nuc.nucid and lev_nuc.z = 54 and levels.l_seqno = 0"
    );
}

#[test]
fn test_two_hops() {
    let plan = translate("L_DECAY.LEVEL.NUC.Z", "").unwrap();

    assert_eq!(plan.select, "lev_nuc.z");
    assert_eq!(
        plan.tables,
        vec!["l_decays", "levels as dec_p_lev", "nuclides as lev_nuc"]
    );
    assert_eq!(
        plan.predicates,
        vec![
            "l_decays.l_seqno = dec_p_lev.l_seqno",
            "l_decays.nucid = dec_p_lev.nucid",
            "dec_p_lev.nucid = lev_nuc.nucid"
        ]
    );
}

#[test]
fn test_named_constants() {
    assert_eq!(
        sql("L_DECAY.PERC", "L_DECAY.MODE = DECAY_Bm"),
        "select l_decays.perc from l_decays where l_decays.decay_code = 2"
    );
    assert_eq!(
        sql("DR_X.ENERGY", "DR_X.SHELL = SHELL_K"),
        "select decay_radiations.energy from decay_radiations \
         where type_a = 'G' and type_b='X' and decay_radiations.type_c = 'K'"
    );
}

#[test]
fn test_or_condition_kept_together() {
    assert_eq!(
        sql("DR_BETAM.ENERGY", "DR_BETAM.ENERGY < 10 or DR_BETAM.ENERGY > 1000"),
        "select decay_radiations.energy from decay_radiations \
         where type_a='B-' and (decay_radiations.energy < 10 or decay_radiations.energy > 1000)"
    );
}

#[test]
fn test_principal_table_check_for_every_entity() {
    let translator = translator();
    let catalog = Catalog::global();

    for entity in catalog.entities() {
        let field = format!("{}.*", entity.name);
        assert!(translator.check(&field, ""), "{} alone", entity.name);

        for relation in &entity.relations {
            let through = format!("{}.{}.ALL", entity.name, relation.name);
            assert!(translator.check(&field, &through), "{through}");
        }

        for other in catalog.entities().iter().filter(|o| o.table != entity.table) {
            let filter = format!("{}.* is not null", other.name);
            assert!(!translator.check(&field, &filter), "{} with {}", entity.name, other.name);
            assert!(matches!(
                translator.assemble(&field, &filter),
                Err(TranslateError::AmbiguousPrincipalTable { tables }) if tables.len() == 2
            ));
        }
    }
}

#[test]
fn test_relation_predicates_are_exactly_declared() {
    let translator = translator();
    let catalog = Catalog::global();

    for entity in catalog.entities() {
        for relation in &entity.relations {
            let target = catalog.entity(&relation.target).unwrap();
            let field = &target.fields[0];
            let parsed = translator.parse(&format!("{}.{}.{}", entity.name, relation.name, field.name));

            let mut expected: Vec<String> = entity.condition.iter().cloned().collect();
            expected.extend(relation.predicates(&entity.table, &target.table));

            assert_eq!(parsed.predicates, expected);
            assert_eq!(
                parsed.text(),
                format!("{}.{}", relation.qualifier(&target.table), field.column)
            );
        }
    }
}

#[test]
fn test_glued_expression_needs_cleanup() {
    let plan = translate("NUCLIDE.Z", "NUCLIDE.Z>50and NUCLIDE.N<80").unwrap();
    assert_eq!(plan.diagnostics.len(), 2);

    let cleaned = translator()
        .with_force_clean(true)
        .assemble("NUCLIDE.Z", "(NUCLIDE.Z>50)and NUCLIDE.N<80")
        .unwrap();
    assert!(cleaned.diagnostics.is_empty());
    assert_eq!(
        cleaned.to_sql(),
        "select nuclides.z from nuclides where ( nuclides.z >50)and nuclides.n <80"
    );
}

#[test]
fn test_unchecked_build_fires_rules() {
    let plan = translator().build_unchecked("GAMMA.ENERGY LEVEL.ENERGY", "NUCLIDE.Z = 54");

    assert_eq!(plan.tables, vec!["gammas", "levels", "nuclides"]);
    assert_eq!(
        plan.rules,
        vec![
            "levels of the nuclide",
            "gammas of the nuclide",
            "gammas de-exciting the level"
        ]
    );
    assert!(plan.to_sql().contains("levels.l_seqno = gammas.l_seqno"));
}

#[test]
fn test_fast_yield_compares_numbers() {
    assert_eq!(
        sql(
            "CUM_FY.FAST_YIELD",
            "CUM_FY.FAST_YIELD > 0.01 ORDER BY CUM_FY.FAST_YIELD"
        ),
        "select cum_fy.fast_yield_num from cum_fy where cum_fy.fast_yield_num > 0.01 \
         ORDER BY cum_fy.fast_yield_num"
    );
}

#[test]
fn test_beta_of_either_sign() {
    assert_eq!(
        sql("DR_BETA.ENERGY", "DR_BETA.PARENT_NUC_ID = '22NA'"),
        "select decay_radiations.energy from decay_radiations \
         where type_a in ('B-','B+') and decay_radiations.parent_nucid = '22NA'"
    );
}
