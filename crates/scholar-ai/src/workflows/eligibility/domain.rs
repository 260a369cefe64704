use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScholarshipId(pub String);

/// Programmes a student can be enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Programme {
    Engineering,
    Science,
    Geoscience,
    #[serde(rename = "Information Technology")]
    InformationTechnology,
    #[serde(rename = "Business Management")]
    BusinessManagement,
    #[serde(rename = "Applied Chemistry")]
    AppliedChemistry,
    Other,
}

impl Programme {
    pub const ALL: [Programme; 7] = [
        Programme::Engineering,
        Programme::Science,
        Programme::Geoscience,
        Programme::InformationTechnology,
        Programme::BusinessManagement,
        Programme::AppliedChemistry,
        Programme::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Programme::Engineering => "Engineering",
            Programme::Science => "Science",
            Programme::Geoscience => "Geoscience",
            Programme::InformationTechnology => "Information Technology",
            Programme::BusinessManagement => "Business Management",
            Programme::AppliedChemistry => "Applied Chemistry",
            Programme::Other => "Other",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|programme| programme.label().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Programme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Year of study, foundation through final year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum YearOfStudy {
    Foundation,
    #[serde(rename = "Year 1")]
    Year1,
    #[serde(rename = "Year 2")]
    Year2,
    #[serde(rename = "Year 3")]
    Year3,
    #[serde(rename = "Year 4")]
    Year4,
}

impl YearOfStudy {
    pub const ALL: [YearOfStudy; 5] = [
        YearOfStudy::Foundation,
        YearOfStudy::Year1,
        YearOfStudy::Year2,
        YearOfStudy::Year3,
        YearOfStudy::Year4,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            YearOfStudy::Foundation => "Foundation",
            YearOfStudy::Year1 => "Year 1",
            YearOfStudy::Year2 => "Year 2",
            YearOfStudy::Year3 => "Year 3",
            YearOfStudy::Year4 => "Year 4",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|year| year.label().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for YearOfStudy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Admission constraint on a set-valued criterion (years, programmes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Admission<T: Ord> {
    Any,
    Only(BTreeSet<T>),
}

impl<T: Ord> Admission<T> {
    pub fn only(values: impl IntoIterator<Item = T>) -> Self {
        Admission::Only(values.into_iter().collect())
    }

    pub fn admits(&self, value: &T) -> bool {
        match self {
            Admission::Any => true,
            Admission::Only(allowed) => allowed.contains(value),
        }
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Admission<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Admission::Any => f.write_str("All"),
            Admission::Only(allowed) => {
                for (index, value) in allowed.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Immutable catalog entry describing a scholarship's hard requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scholarship {
    pub id: ScholarshipId,
    pub name: String,
    pub min_cgpa: f64,
    /// Household income ceiling; `None` means no ceiling.
    pub max_income: Option<f64>,
    pub min_cocu: f64,
    pub allowed_years: Admission<YearOfStudy>,
    pub malaysian_only: bool,
    pub allowed_programmes: Admission<Programme>,
    pub application_link: String,
}

/// Student supplied profile evaluated against every catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub cgpa: f64,
    pub income: f64,
    pub programme: Programme,
    pub year: YearOfStudy,
    pub cocu: f64,
    pub is_malaysian: bool,
}
