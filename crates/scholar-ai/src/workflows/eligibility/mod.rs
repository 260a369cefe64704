//! Scholarship eligibility matching.
//!
//! A profile is checked against every catalog entry with six independent hard requirements.
//! Entries that pass all of them receive a 0-100 match score describing how comfortably the
//! profile clears the bar.

pub mod catalog;
pub mod domain;
mod guard;
pub mod router;
mod rules;
mod scoring;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, ScholarshipCatalog};
pub use domain::{Admission, Programme, Scholarship, ScholarshipId, UserProfile, YearOfStudy};
pub use guard::{ProfileGuard, ValidationError, CGPA_SCALE, COCU_SCALE};
pub use router::eligibility_router;
pub use rules::IneligibilityReason;
pub use scoring::MatchStrength;

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

/// Outcome of evaluating one profile against one scholarship.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityResult {
    scholarship: Scholarship,
    is_eligible: bool,
    reasons: Vec<IneligibilityReason>,
    match_score: u8,
}

impl EligibilityResult {
    fn from_reasons(
        profile: &UserProfile,
        scholarship: &Scholarship,
        reasons: Vec<IneligibilityReason>,
    ) -> Self {
        let is_eligible = reasons.is_empty();
        let match_score = if is_eligible {
            scoring::match_score(profile, scholarship)
        } else {
            0
        };

        Self {
            scholarship: scholarship.clone(),
            is_eligible,
            reasons,
            match_score,
        }
    }

    pub fn scholarship(&self) -> &Scholarship {
        &self.scholarship
    }

    pub fn is_eligible(&self) -> bool {
        self.is_eligible
    }

    pub fn reasons(&self) -> &[IneligibilityReason] {
        &self.reasons
    }

    /// 0 for ineligible results.
    pub fn match_score(&self) -> u8 {
        self.match_score
    }

    pub fn strength(&self) -> Option<MatchStrength> {
        self.is_eligible
            .then(|| MatchStrength::from_score(self.match_score))
    }

    pub fn view(&self) -> EligibilityResultView {
        EligibilityResultView {
            scholarship_id: self.scholarship.id.clone(),
            name: self.scholarship.name.clone(),
            application_link: self.scholarship.application_link.clone(),
            is_eligible: self.is_eligible,
            reasons: self.reasons.iter().map(IneligibilityReason::summary).collect(),
            match_score: self.match_score,
            strength: self.strength(),
        }
    }
}

/// Presentation-ready projection with reasons rendered as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityResultView {
    pub scholarship_id: ScholarshipId,
    pub name: String,
    pub application_link: String,
    pub is_eligible: bool,
    pub reasons: Vec<String>,
    pub match_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<MatchStrength>,
}

/// Evaluate a profile against each entry, preserving catalog order.
pub fn evaluate(profile: &UserProfile, catalog: &[Scholarship]) -> Vec<EligibilityResult> {
    catalog
        .iter()
        .map(|scholarship| {
            let reasons = rules::check_requirements(profile, scholarship);
            EligibilityResult::from_reasons(profile, scholarship, reasons)
        })
        .collect()
}

/// Eligible first, strongest match first; otherwise catalog order is kept.
pub fn rank_results(results: &mut [EligibilityResult]) {
    results.sort_by(|a, b| match (a.is_eligible, b.is_eligible) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => b.match_score.cmp(&a.match_score),
    });
}

/// Stateless evaluator bound to the catalog loaded at startup.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    catalog: Arc<ScholarshipCatalog>,
    guard: ProfileGuard,
}

impl EligibilityEngine {
    pub fn new(catalog: Arc<ScholarshipCatalog>) -> Self {
        Self {
            catalog,
            guard: ProfileGuard,
        }
    }

    pub fn catalog(&self) -> &ScholarshipCatalog {
        &self.catalog
    }

    pub fn evaluate(&self, profile: &UserProfile) -> Vec<EligibilityResult> {
        let results = evaluate(profile, self.catalog.entries());
        debug!(
            scholarships = results.len(),
            eligible = results.iter().filter(|result| result.is_eligible).count(),
            "evaluated scholarship eligibility"
        );
        results
    }

    /// Validate the profile, evaluate it, and rank the results.
    pub fn match_profile(
        &self,
        profile: &UserProfile,
    ) -> Result<Vec<EligibilityResult>, ValidationError> {
        self.guard.validate(profile)?;
        let mut results = self.evaluate(profile);
        rank_results(&mut results);
        Ok(results)
    }
}
