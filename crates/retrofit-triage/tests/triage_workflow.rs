use retrofit_triage::workflows::deprivation::DeprivationLookup;
use retrofit_triage::workflows::triage::{
    evaluate, FinancialPathway, IntakeForm, Outcome, RejectionReason, TriageEngine,
};
use serde_json::json;
use std::sync::Arc;

const ELIGIBLE_LIST: &str = "Postcode\nPL5 2LD\nPL5 1EE\nPL5 1TH\nPL5 1BT\nPL5 1QZ\n";
const DEPRIVATION_TABLE: &str = "postcode,imdDecile,incomeDecile\n\
PL5 2LD,1,1\n\
PL5 1EE,2,1\n\
EX1 1AA,8,9\n\
not,a,row\n";

fn engine() -> TriageEngine {
    let (lookup, report) =
        DeprivationLookup::from_readers(ELIGIBLE_LIST.as_bytes(), DEPRIVATION_TABLE.as_bytes())
            .expect("reference data loads");
    assert_eq!(report.eligible_postcodes, 5);
    assert_eq!(report.deprivation_records, 3);
    assert_eq!(report.skipped_rows, 1);
    TriageEngine::new(Arc::new(lookup))
}

fn form(value: serde_json::Value) -> IntakeForm {
    serde_json::from_value(value).expect("intake form deserializes")
}

#[test]
fn deprivation_household_in_cavity_home_is_top_priority() {
    let engine = engine();
    let assessment = engine.assess(&form(json!({
        "postcode": "PL5 2LD",
        "epc_rating": "E",
        "sap_score": 65,
        "cavity_feasible": true,
        "vulnerabilities": ["v1", "v2"]
    })));

    assert_eq!(assessment.result.outcome, Outcome::Year1Priority1);
    assert_eq!(assessment.result.pathway_label(), "Pathway 1 – IMD");
    assert!(assessment.result.advisories.supporting_sections_required);
}

#[test]
fn flex_pair_household_without_cavity_is_year_two() {
    let engine = engine();
    let assessment = engine.assess(&form(json!({
        "postcode": "EX1 1AA",
        "proxies": ["1", "2"],
        "epc_rating": "G",
        "sap_score": 30,
        "cavity_feasible": false
    })));

    assert_eq!(assessment.result.outcome, Outcome::Year2);
    assert_eq!(
        assessment.result.pathway,
        Some(FinancialPathway::FlexProxyPair)
    );
    assert_eq!(
        assessment.result.pathway_label(),
        "Pathway 2 – ECO Flex Route 2"
    );
}

#[test]
fn confirmed_review_overrides_everything() {
    let engine = engine();
    let assessment = engine.assess(&form(json!({
        "postcode": "PL5 1EE",
        "epc_rating": "F",
        "sap_score": 40,
        "cavity_feasible": true,
        "vulnerabilities": ["v1", "v2"],
        "manual_review": "yes"
    })));

    assert_eq!(assessment.result.outcome, Outcome::ReferToDE);
    assert!(assessment.summary.starts_with("Outcome: Refer to DE"));
}

#[test]
fn empty_form_still_produces_a_decision() {
    let engine = engine();
    let assessment = engine.assess(&IntakeForm::default());

    assert_eq!(assessment.result.outcome, Outcome::NotEligible);
    assert_eq!(
        assessment.result.rejection_reason,
        Some(RejectionReason::NoFinancialPathway)
    );
    assert_eq!(assessment.snapshot.household.adults, 0);
}

#[test]
fn identical_input_gives_byte_identical_output() {
    let engine = engine();
    let intake = form(json!({
        "postcode": "pl5 1th",
        "benefits": ["universal_credit", "pension_credit"],
        "proxies": ["6", "4"],
        "gross_income": "21000",
        "epc_rating": "d",
        "sap_score": "61",
        "already_upgraded": true,
        "vulnerabilities": ["v3"]
    }));

    let first = serde_json::to_string(&engine.assess(&intake)).expect("serializes");
    let second = serde_json::to_string(&engine.assess(&intake)).expect("serializes");

    assert_eq!(first, second);
}

#[test]
fn pure_evaluate_matches_engine() {
    let engine = engine();
    let household = form(json!({
        "postcode": "PL5 1BT",
        "epc_rating": "D",
        "sap_score": 50,
        "cavity_feasible": true
    }))
    .household();

    assert_eq!(
        evaluate(&household, engine.lookup()),
        engine.evaluate(&household)
    );
}

#[test]
fn postcode_check_surfaces_deciles() {
    let engine = engine();

    let eligible = engine.check_postcode("pl5 2ld");
    assert!(eligible.imd_eligible);
    assert_eq!(eligible.deprivation.map(|record| record.imd_decile), Some(1));

    let outside = engine.check_postcode("EX1 1AA");
    assert!(!outside.imd_eligible);
    assert_eq!(outside.deprivation.map(|record| record.income_decile), Some(9));
}
