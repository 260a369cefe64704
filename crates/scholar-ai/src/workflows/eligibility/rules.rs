use serde::{Deserialize, Serialize};

use super::domain::{Admission, Programme, Scholarship, UserProfile, YearOfStudy};

/// Hard requirement a profile failed, in the order the checks run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IneligibilityReason {
    CgpaBelowMinimum { actual: f64, required: f64 },
    IncomeAboveLimit { actual: f64, limit: f64 },
    CocurricularBelowMinimum { actual: f64, required: f64 },
    CitizenshipRequired,
    YearNotOffered { allowed: Vec<YearOfStudy> },
    ProgrammeNotListed { programme: Programme },
}

impl IneligibilityReason {
    pub fn summary(&self) -> String {
        match self {
            IneligibilityReason::CgpaBelowMinimum { actual, required } => format!(
                "Current CGPA ({:.2}) is below the minimum requirement of {:.2}.",
                actual, required
            ),
            IneligibilityReason::IncomeAboveLimit { actual, limit } => format!(
                "Household income (RM {}) exceeds the limit of RM {}.",
                actual, limit
            ),
            IneligibilityReason::CocurricularBelowMinimum { actual, required } => format!(
                "Co-curricular score ({}) is below the minimum required ({}).",
                actual, required
            ),
            IneligibilityReason::CitizenshipRequired => {
                "This scholarship is strictly for Malaysian citizens.".to_string()
            }
            IneligibilityReason::YearNotOffered { allowed } => {
                let labels = allowed
                    .iter()
                    .map(|year| year.label())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Only open to students in: {labels}.")
            }
            IneligibilityReason::ProgrammeNotListed { programme } => format!(
                "Your programme ({}) is not listed for this scholarship.",
                programme
            ),
        }
    }
}

/// Run the six hard checks; every failure contributes one reason.
pub(crate) fn check_requirements(
    profile: &UserProfile,
    scholarship: &Scholarship,
) -> Vec<IneligibilityReason> {
    let mut reasons = Vec::new();

    if profile.cgpa < scholarship.min_cgpa {
        reasons.push(IneligibilityReason::CgpaBelowMinimum {
            actual: profile.cgpa,
            required: scholarship.min_cgpa,
        });
    }

    if let Some(limit) = scholarship.max_income {
        if profile.income > limit {
            reasons.push(IneligibilityReason::IncomeAboveLimit {
                actual: profile.income,
                limit,
            });
        }
    }

    if profile.cocu < scholarship.min_cocu {
        reasons.push(IneligibilityReason::CocurricularBelowMinimum {
            actual: profile.cocu,
            required: scholarship.min_cocu,
        });
    }

    if scholarship.malaysian_only && !profile.is_malaysian {
        reasons.push(IneligibilityReason::CitizenshipRequired);
    }

    if let Admission::Only(allowed) = &scholarship.allowed_years {
        if !allowed.contains(&profile.year) {
            reasons.push(IneligibilityReason::YearNotOffered {
                allowed: allowed.iter().copied().collect(),
            });
        }
    }

    if !scholarship.allowed_programmes.admits(&profile.programme) {
        reasons.push(IneligibilityReason::ProgrammeNotListed {
            programme: profile.programme,
        });
    }

    reasons
}
