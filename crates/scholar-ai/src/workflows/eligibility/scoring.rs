use serde::{Deserialize, Serialize};

use super::domain::{Scholarship, UserProfile};

const BASE_SCORE: f64 = 60.0;
const CGPA_BONUS: f64 = 20.0;
const COCU_BONUS: f64 = 10.0;
const INCOME_BONUS: f64 = 10.0;
const UNCAPPED_INCOME_BONUS: f64 = 5.0;
const MAX_CGPA: f64 = 4.0;
const MAX_COCU: f64 = 10.0;

/// Strength of a match for an eligible scholarship.
pub(crate) fn match_score(profile: &UserProfile, scholarship: &Scholarship) -> u8 {
    let mut score = BASE_SCORE;

    let cgpa_range = MAX_CGPA - scholarship.min_cgpa;
    if cgpa_range > 0.0 {
        score += (profile.cgpa - scholarship.min_cgpa) / cgpa_range * CGPA_BONUS;
    }

    let cocu_range = MAX_COCU - scholarship.min_cocu;
    if cocu_range > 0.0 {
        score += (profile.cocu - scholarship.min_cocu) / cocu_range * COCU_BONUS;
    }

    match scholarship.max_income {
        Some(limit) if limit > 0.0 => {
            score += (1.0 - profile.income / limit) * INCOME_BONUS;
        }
        // A zero ceiling only admits zero income; there is no range to scale against.
        Some(_) => {}
        None => score += UNCAPPED_INCOME_BONUS,
    }

    // `as` saturates at the u8 bounds.
    score.min(100.0).round() as u8
}

/// Coarse band used when presenting eligible matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrength {
    Excellent,
    Strong,
    Fair,
}

impl MatchStrength {
    pub fn from_score(score: u8) -> Self {
        if score >= 90 {
            MatchStrength::Excellent
        } else if score >= 75 {
            MatchStrength::Strong
        } else {
            MatchStrength::Fair
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchStrength::Excellent => "excellent",
            MatchStrength::Strong => "strong",
            MatchStrength::Fair => "fair",
        }
    }
}
