use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{Admission, Programme, Scholarship, ScholarshipId, YearOfStudy};

const UNCONSTRAINED_LABEL: &str = "All";
const LIST_SEPARATOR: char = ';';

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: usize, detail: String },
    Empty,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read scholarship catalog: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid scholarship catalog CSV: {}", err),
            CatalogError::InvalidRow { line, detail } => {
                write!(f, "invalid scholarship catalog entry on line {}: {}", line, detail)
            }
            CatalogError::Empty => write!(f, "scholarship catalog contains no entries"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::InvalidRow { .. } | CatalogError::Empty => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Ordered, read-only list of scholarships loaded once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ScholarshipCatalog {
    entries: Vec<Scholarship>,
}

impl ScholarshipCatalog {
    pub fn new(entries: Vec<Scholarship>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Scholarship] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Scholarship> {
        self.entries.iter().find(|entry| entry.id.0 == id)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse a CSV export. List columns take `;`-separated labels or `All`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            let row = record?;
            let line = index + 2;
            entries.push(row.into_scholarship(line)?);
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self { entries })
    }

    /// The compiled-in reference catalog.
    pub fn reference() -> Self {
        use Programme::*;

        let entry = |id: &str,
                     name: &str,
                     min_cgpa: f64,
                     max_income: Option<f64>,
                     min_cocu: f64,
                     allowed_years: Admission<YearOfStudy>,
                     allowed_programmes: Admission<Programme>,
                     malaysian_only: bool,
                     application_link: &str| Scholarship {
            id: ScholarshipId(id.to_string()),
            name: name.to_string(),
            min_cgpa,
            max_income,
            min_cocu,
            allowed_years,
            malaysian_only,
            allowed_programmes,
            application_link: application_link.to_string(),
        };

        Self::new(vec![
            entry(
                "gamuda",
                "Gamuda Scholarship",
                3.4,
                Some(6000.0),
                7.0,
                Admission::Any,
                Admission::only([
                    Engineering,
                    Science,
                    Geoscience,
                    InformationTechnology,
                    BusinessManagement,
                ]),
                true,
                "https://gamuda.com/yayasan-gamuda/scholarship/",
            ),
            entry(
                "petronas",
                "Petronas Scholarship",
                3.5,
                Some(5000.0),
                8.0,
                Admission::only([YearOfStudy::Year1, YearOfStudy::Year2]),
                Admission::Any,
                true,
                "https://educationsponsorship.petronas.com.my/OAS",
            ),
            entry(
                "yayasan-utp",
                "Yayasan UTP",
                3.5,
                Some(8000.0),
                6.0,
                Admission::Any,
                Admission::Any,
                false,
                "https://www.utp.edu.my/Pages/The-University/YUTP/Types-of-Funds/Scholarship.aspx",
            ),
            entry(
                "khazanah",
                "Khazanah Scholarship",
                3.5,
                Some(7000.0),
                9.0,
                Admission::Any,
                Admission::Any,
                true,
                "https://www.yayasankhazanah.com.my/scholarship-programmes/khazanah-global-scholarship-programme",
            ),
            entry(
                "shell",
                "Shell Scholarship",
                3.5,
                Some(6500.0),
                7.0,
                Admission::Any,
                Admission::only([Engineering, Geoscience, InformationTechnology]),
                true,
                "https://www.shell.com.my/about-us/careers/students-and-graduates/scholarships.html",
            ),
            entry(
                "maxis",
                "Maxis Scholarship",
                3.5,
                None,
                7.0,
                Admission::Any,
                Admission::only([InformationTechnology, Engineering, BusinessManagement]),
                true,
                "https://www.maxis.com.my/en/about-maxis/career/maxis-scholarship-programme/",
            ),
            entry(
                "sime-darby",
                "Sime Darby Scholarship",
                3.3,
                Some(6000.0),
                8.0,
                Admission::Any,
                Admission::Any,
                true,
                "https://www.yayasansimedarby.com/scholarship-information",
            ),
        ])
    }
}

impl Default for ScholarshipCatalog {
    fn default() -> Self {
        Self::reference()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    min_cgpa: f64,
    max_income: Option<f64>,
    min_cocu: f64,
    allowed_years: String,
    malaysian_only: bool,
    allowed_programmes: String,
    application_link: String,
}

impl CatalogRow {
    fn into_scholarship(self, line: usize) -> Result<Scholarship, CatalogError> {
        if self.id.is_empty() {
            return Err(CatalogError::InvalidRow {
                line,
                detail: "id must not be empty".to_string(),
            });
        }

        let allowed_years = parse_admission(&self.allowed_years, YearOfStudy::from_label)
            .map_err(|label| CatalogError::InvalidRow {
                line,
                detail: format!("unknown year of study '{label}'"),
            })?;
        let allowed_programmes =
            parse_admission(&self.allowed_programmes, Programme::from_label).map_err(|label| {
                CatalogError::InvalidRow {
                    line,
                    detail: format!("unknown programme '{label}'"),
                }
            })?;

        Ok(Scholarship {
            id: ScholarshipId(self.id),
            name: self.name,
            min_cgpa: self.min_cgpa,
            max_income: self.max_income,
            min_cocu: self.min_cocu,
            allowed_years,
            malaysian_only: self.malaysian_only,
            allowed_programmes,
            application_link: self.application_link,
        })
    }
}

/// Resolve the `All` marker at the file boundary so the engine never sees it.
fn parse_admission<T, F>(raw: &str, parse: F) -> Result<Admission<T>, String>
where
    T: Ord,
    F: Fn(&str) -> Option<T>,
{
    let labels: Vec<&str> = raw
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .collect();

    if labels.is_empty()
        || labels
            .iter()
            .any(|label| label.eq_ignore_ascii_case(UNCONSTRAINED_LABEL))
    {
        return Ok(Admission::Any);
    }

    let mut allowed = BTreeSet::new();
    for label in labels {
        let value = parse(label).ok_or_else(|| label.to_string())?;
        allowed.insert(value);
    }
    Ok(Admission::Only(allowed))
}
