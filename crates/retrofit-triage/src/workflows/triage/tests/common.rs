use std::collections::BTreeSet;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::workflows::deprivation::DeprivationLookup;
use crate::workflows::triage::domain::{EpcRating, HouseholdInput, ManualReview, ProxyCode};
use crate::workflows::triage::{triage_router, TriageEngine};

pub(super) const ELIGIBLE_POSTCODE: &str = "PL5 2LD";

pub(super) fn lookup() -> DeprivationLookup {
    DeprivationLookup::with_eligible_postcodes(["PL52LD", "PL51EE", "PL51TH", "PL51BT", "PL51QZ"])
}

pub(super) fn engine() -> TriageEngine {
    TriageEngine::new(Arc::new(lookup()))
}

pub(super) fn proxies(codes: &[u8]) -> BTreeSet<ProxyCode> {
    codes
        .iter()
        .map(|code| ProxyCode::new(*code).expect("valid proxy code"))
        .collect()
}

pub(super) fn codes(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Household that qualifies on nothing financially but has an eligible property.
pub(super) fn baseline_household() -> HouseholdInput {
    HouseholdInput {
        postcode: "EX1 1AA".to_string(),
        benefits: BTreeSet::new(),
        proxies: BTreeSet::new(),
        gross_income: 52_000.0,
        net_income: 41_000.0,
        housing_cost: 9_000.0,
        adults: 2,
        dependents: 0,
        vulnerabilities: BTreeSet::new(),
        cavity_feasible: true,
        already_upgraded: false,
        epc_rating: Some(EpcRating::E),
        sap_score: 55,
        manual_review: ManualReview::None,
    }
}

/// Deprivation-eligible household in a poorly rated home.
pub(super) fn imd_household() -> HouseholdInput {
    HouseholdInput {
        postcode: ELIGIBLE_POSTCODE.to_string(),
        ..baseline_household()
    }
}

pub(super) async fn call(request: Request<Body>) -> Response {
    use tower::ServiceExt;

    triage_router(Arc::new(engine()))
        .oneshot(request)
        .await
        .expect("router responds")
}

pub(super) async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
