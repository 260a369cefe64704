//! Loading a scholarship catalog from a CSV export and matching against it.

use std::io::Cursor;
use std::sync::Arc;

use scholar_ai::workflows::eligibility::{
    Admission, CatalogError, EligibilityEngine, Programme, ScholarshipCatalog, UserProfile,
    YearOfStudy,
};

const EXPORT: &str = "\
id,name,min_cgpa,max_income,min_cocu,allowed_years,malaysian_only,allowed_programmes,application_link
geo-fund,Geoscience Field Fund,3.00,5000,5,Year 3;Year 4,true,Geoscience,https://example.org/geo
open-merit,Open Merit Award,3.20,,6,All,false,All,https://example.org/merit
";

fn geoscientist() -> UserProfile {
    UserProfile {
        cgpa: 3.4,
        income: 4000.0,
        programme: Programme::Geoscience,
        year: YearOfStudy::Year3,
        cocu: 6.0,
        is_malaysian: true,
    }
}

#[test]
fn csv_export_resolves_lists_and_open_limits() {
    let catalog = ScholarshipCatalog::from_reader(Cursor::new(EXPORT)).expect("catalog parses");
    assert_eq!(catalog.len(), 2);

    let geo = catalog.get("geo-fund").expect("geo entry");
    assert_eq!(geo.max_income, Some(5000.0));
    assert_eq!(
        geo.allowed_years,
        Admission::only([YearOfStudy::Year3, YearOfStudy::Year4])
    );
    assert_eq!(geo.allowed_programmes, Admission::only([Programme::Geoscience]));

    let open = catalog.get("open-merit").expect("merit entry");
    assert_eq!(open.max_income, None);
    assert_eq!(open.allowed_years, Admission::Any);
    assert_eq!(open.allowed_programmes, Admission::Any);
}

#[test]
fn imported_catalog_drives_the_engine() {
    let catalog = ScholarshipCatalog::from_reader(Cursor::new(EXPORT)).expect("catalog parses");
    let engine = EligibilityEngine::new(Arc::new(catalog));

    let results = engine.match_profile(&geoscientist()).expect("valid profile");
    assert!(results.iter().all(|result| result.is_eligible()));

    let mut junior = geoscientist();
    junior.year = YearOfStudy::Year1;
    let results = engine.match_profile(&junior).expect("valid profile");
    let geo = results
        .iter()
        .find(|result| result.scholarship().id.0 == "geo-fund")
        .expect("geo result");
    assert_eq!(
        geo.view().reasons,
        vec!["Only open to students in: Year 3, Year 4.".to_string()]
    );
}

#[test]
fn unknown_labels_point_at_the_offending_line() {
    let export = format!(
        "{}bad-entry,Broken,3.0,,5,Year 7,false,All,https://example.org/bad\n",
        EXPORT
    );

    match ScholarshipCatalog::from_reader(Cursor::new(export)) {
        Err(CatalogError::InvalidRow { line, .. }) => assert_eq!(line, 4),
        other => panic!("expected invalid row error, got {other:?}"),
    }
}
