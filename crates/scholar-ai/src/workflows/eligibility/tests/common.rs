use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::eligibility::domain::{
    Admission, Programme, Scholarship, ScholarshipId, UserProfile, YearOfStudy,
};
use crate::workflows::eligibility::{EligibilityEngine, EligibilityResult, ScholarshipCatalog};

pub(super) fn profile() -> UserProfile {
    UserProfile {
        cgpa: 3.5,
        income: 3000.0,
        programme: Programme::Engineering,
        year: YearOfStudy::Year2,
        cocu: 7.0,
        is_malaysian: true,
    }
}

pub(super) fn reference_entry(id: &str) -> Scholarship {
    ScholarshipCatalog::reference()
        .get(id)
        .cloned()
        .expect("reference catalog entry")
}

pub(super) fn bursary(min_cgpa: f64, max_income: Option<f64>, min_cocu: f64) -> Scholarship {
    Scholarship {
        id: ScholarshipId("campus-bursary".to_string()),
        name: "Campus Bursary".to_string(),
        min_cgpa,
        max_income,
        min_cocu,
        allowed_years: Admission::Any,
        malaysian_only: false,
        allowed_programmes: Admission::Any,
        application_link: "https://example.edu/bursary".to_string(),
    }
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(Arc::new(ScholarshipCatalog::reference()))
}

pub(super) fn result_for<'a>(results: &'a [EligibilityResult], id: &str) -> &'a EligibilityResult {
    results
        .iter()
        .find(|result| result.scholarship().id.0 == id)
        .unwrap_or_else(|| panic!("missing result for {id}"))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
