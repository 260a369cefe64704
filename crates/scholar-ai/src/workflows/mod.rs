pub mod eligibility;
pub mod essay;
