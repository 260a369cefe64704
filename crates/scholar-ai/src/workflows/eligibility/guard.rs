use super::domain::UserProfile;

/// Validation errors raised before a profile reaches the rules engine.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("CGPA must be between 0.00 and 4.00 (found {0})")]
    CgpaOutOfRange(f64),
    #[error("co-curricular score must be between 0 and 10 (found {0})")]
    CocurricularOutOfRange(f64),
    #[error("household income must be a non-negative amount (found {0})")]
    InvalidIncome(f64),
}

pub const CGPA_SCALE: f64 = 4.0;
pub const COCU_SCALE: f64 = 10.0;

/// Guard checking that profile figures sit on the scales the catalog uses.
///
/// The engine accepts anything; this is the gate for untrusted input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileGuard;

impl ProfileGuard {
    pub fn validate(&self, profile: &UserProfile) -> Result<(), ValidationError> {
        if !(0.0..=CGPA_SCALE).contains(&profile.cgpa) {
            return Err(ValidationError::CgpaOutOfRange(profile.cgpa));
        }

        if !profile.income.is_finite() || profile.income < 0.0 {
            return Err(ValidationError::InvalidIncome(profile.income));
        }

        if !(0.0..=COCU_SCALE).contains(&profile.cocu) {
            return Err(ValidationError::CocurricularOutOfRange(profile.cocu));
        }

        Ok(())
    }
}
