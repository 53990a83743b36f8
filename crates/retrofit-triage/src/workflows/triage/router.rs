use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use super::intake::IntakeForm;
use super::TriageEngine;

/// Router exposing assessment and postcode lookups over HTTP.
pub fn triage_router(engine: Arc<TriageEngine>) -> Router {
    Router::new()
        .route("/api/v1/triage/assessments", post(assess_handler))
        .route("/api/v1/triage/postcodes/:postcode", get(postcode_handler))
        .with_state(engine)
}

pub(crate) async fn assess_handler(
    State(engine): State<Arc<TriageEngine>>,
    axum::Json(form): axum::Json<IntakeForm>,
) -> Response {
    let assessment = engine.assess(&form);
    (StatusCode::OK, axum::Json(assessment)).into_response()
}

pub(crate) async fn postcode_handler(
    State(engine): State<Arc<TriageEngine>>,
    Path(postcode): Path<String>,
) -> Response {
    let check = engine.check_postcode(&postcode);
    (StatusCode::OK, axum::Json(check)).into_response()
}
