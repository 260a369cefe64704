use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::{Programme, UserProfile, YearOfStudy};
use super::{EligibilityEngine, EligibilityResultView};

/// Ranked eligibility report returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityReport {
    pub eligible_count: usize,
    pub ineligible_count: usize,
    pub results: Vec<EligibilityResultView>,
}

/// Router builder exposing catalog lookup and profile matching.
pub fn eligibility_router(engine: Arc<EligibilityEngine>) -> Router {
    Router::new()
        .route("/api/v1/scholarships", get(catalog_handler))
        .route("/api/v1/options", get(options_handler))
        .route("/api/v1/eligibility", post(eligibility_handler))
        .with_state(engine)
}

pub(crate) async fn catalog_handler(State(engine): State<Arc<EligibilityEngine>>) -> Response {
    let entries = engine.catalog().entries().to_vec();
    (StatusCode::OK, axum::Json(entries)).into_response()
}

pub(crate) async fn options_handler() -> Response {
    let programmes: Vec<&str> = Programme::ALL.iter().map(|p| p.label()).collect();
    let years: Vec<&str> = YearOfStudy::ALL.iter().map(|y| y.label()).collect();
    let payload = json!({
        "programmes": programmes,
        "years": years,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn eligibility_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    axum::Json(profile): axum::Json<UserProfile>,
) -> Response {
    match engine.match_profile(&profile) {
        Ok(results) => {
            let eligible_count = results.iter().filter(|r| r.is_eligible()).count();
            let report = EligibilityReport {
                eligible_count,
                ineligible_count: results.len() - eligible_count,
                results: results.iter().map(|result| result.view()).collect(),
            };
            (StatusCode::OK, axum::Json(report)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
