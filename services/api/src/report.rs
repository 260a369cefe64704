use crate::infra::{parse_programme, parse_year, ConfiguredAnalyzer};
use clap::Args;
use scholar_ai::config::AppConfig;
use scholar_ai::error::AppError;
use scholar_ai::workflows::eligibility::{
    EligibilityEngine, EligibilityResult, Programme, Scholarship, ScholarshipCatalog,
    UserProfile, YearOfStudy, CGPA_SCALE, COCU_SCALE,
};
use scholar_ai::workflows::essay::{word_count, EssayAnalysis, EssayScorer, VocabularyStats};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// CSV catalog to use instead of the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Cumulative GPA on the 0.00-4.00 scale
    #[arg(long)]
    pub(crate) cgpa: f64,
    /// Monthly household income in RM
    #[arg(long)]
    pub(crate) income: f64,
    /// Programme of study, e.g. "Engineering" or "Information Technology"
    #[arg(long, value_parser = parse_programme)]
    pub(crate) programme: Programme,
    /// Year of study, e.g. "Foundation" or "Year 2"
    #[arg(long, value_parser = parse_year)]
    pub(crate) year: YearOfStudy,
    /// Co-curricular score on the 0-10 scale
    #[arg(long)]
    pub(crate) cocu: f64,
    /// Applicant is not a Malaysian citizen
    #[arg(long)]
    pub(crate) non_malaysian: bool,
    /// Hide scholarships the profile does not qualify for
    #[arg(long)]
    pub(crate) eligible_only: bool,
    /// Print the ranked results as JSON
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) source: CatalogArgs,
}

impl EligibilityArgs {
    pub(crate) fn profile(&self) -> UserProfile {
        UserProfile {
            cgpa: self.cgpa,
            income: self.income,
            programme: self.programme,
            year: self.year,
            cocu: self.cocu,
            is_malaysian: !self.non_malaysian,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct EssayArgs {
    /// The essay question being answered
    #[arg(long)]
    pub(crate) prompt: String,
    /// Read the essay from this file instead of stdin
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Print the analysis as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

fn load_catalog(args: &CatalogArgs) -> Result<ScholarshipCatalog, AppError> {
    match &args.catalog {
        Some(path) => Ok(ScholarshipCatalog::from_path(path)?),
        None => Ok(AppConfig::load()?.catalog.load()?),
    }
}

pub(crate) fn run_scholarships(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = load_catalog(&args)?;
    print!("{}", render_catalog(&catalog));
    Ok(())
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let catalog = load_catalog(&args.source)?;
    let engine = EligibilityEngine::new(Arc::new(catalog));
    let profile = args.profile();
    let results = engine.match_profile(&profile)?;

    if args.json {
        let views: Vec<_> = results
            .iter()
            .filter(|result| !args.eligible_only || result.is_eligible())
            .map(EligibilityResult::view)
            .collect();
        println!("{}", to_json(&views));
    } else {
        print!("{}", render_eligibility(&profile, &results, args.eligible_only));
    }
    Ok(())
}

pub(crate) async fn run_essay(args: EssayArgs) -> Result<(), AppError> {
    let essay = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };

    let config = AppConfig::load()?;
    let analyzer = Arc::new(ConfiguredAnalyzer::from_config(&config.semantic));
    let scorer = EssayScorer::new(analyzer);
    let analysis = scorer.analyze_essay(&essay, &args.prompt).await?;

    if args.json {
        println!("{}", to_json(&analysis));
    } else {
        let stats = VocabularyStats::measure(&essay);
        print!("{}", render_essay(&analysis, word_count(&essay), &stats));
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("{{\"error\":\"{err}\"}}"))
}

fn income_limit(scholarship: &Scholarship) -> String {
    match scholarship.max_income {
        Some(limit) => format!("RM {limit}"),
        None => "no limit".to_string(),
    }
}

pub(crate) fn render_catalog(catalog: &ScholarshipCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Scholarship catalog ({} entries)", catalog.len());
    for scholarship in catalog.entries() {
        let _ = writeln!(out, "- {} [{}]", scholarship.name, scholarship.id.0);
        let _ = writeln!(
            out,
            "  min CGPA {:.2}/{:.2} | min co-curricular {}/{} | income {}",
            scholarship.min_cgpa,
            CGPA_SCALE,
            scholarship.min_cocu,
            COCU_SCALE,
            income_limit(scholarship)
        );
        let _ = writeln!(
            out,
            "  years: {} | programmes: {}{}",
            scholarship.allowed_years,
            scholarship.allowed_programmes,
            if scholarship.malaysian_only {
                " | Malaysian citizens only"
            } else {
                ""
            }
        );
    }
    out
}

pub(crate) fn render_eligibility(
    profile: &UserProfile,
    results: &[EligibilityResult],
    eligible_only: bool,
) -> String {
    let eligible = results.iter().filter(|result| result.is_eligible()).count();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Profile: CGPA {:.2} | income RM {} | {} | {} | co-curricular {} | {}",
        profile.cgpa,
        profile.income,
        profile.programme,
        profile.year,
        profile.cocu,
        if profile.is_malaysian {
            "Malaysian"
        } else {
            "non-Malaysian"
        }
    );
    let _ = writeln!(
        out,
        "{} eligible | {} not eligible",
        eligible,
        results.len() - eligible
    );

    if eligible == 0 {
        let _ = writeln!(out, "\nNo scholarships match this profile yet.");
    } else {
        let _ = writeln!(out, "\nEligible scholarships");
    }
    for (rank, result) in results.iter().filter(|r| r.is_eligible()).enumerate() {
        let strength = result.strength().map(|s| s.label()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>2}. {} | {}% match ({})",
            rank + 1,
            result.scholarship().name,
            result.match_score(),
            strength
        );
        let _ = writeln!(out, "    apply: {}", result.scholarship().application_link);
    }

    if !eligible_only && eligible < results.len() {
        let _ = writeln!(out, "\nNot eligible");
        for result in results.iter().filter(|r| !r.is_eligible()) {
            let _ = writeln!(out, "- {}", result.scholarship().name);
            for reason in result.reasons() {
                let _ = writeln!(out, "    * {}", reason.summary());
            }
        }
    }

    out
}

pub(crate) fn render_essay(
    analysis: &EssayAnalysis,
    words: usize,
    stats: &VocabularyStats,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Overall score: {}/100", analysis.overall_score);
    let _ = writeln!(
        out,
        "- relevance {:.0} | vocabulary {} | sentiment {:.0} | tone: {}",
        analysis.relevance_score, analysis.vocabulary_score, analysis.sentiment_score, analysis.tone
    );
    let _ = writeln!(
        out,
        "- {} words | lexical diversity {:.2} | avg word length {:.1} | academic density {:.0}%",
        words,
        stats.type_token_ratio,
        stats.average_token_length,
        stats.academic_density * 100.0
    );

    for (heading, items) in [
        ("Feedback", &analysis.feedback),
        ("Strengths", &analysis.strengths),
        ("Improvements", &analysis.improvements),
    ] {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{heading}:");
        for item in items {
            let _ = writeln!(out, "  - {item}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            cgpa: 3.5,
            income: 3000.0,
            programme: Programme::Engineering,
            year: YearOfStudy::Year2,
            cocu: 7.0,
            is_malaysian: true,
        }
    }

    fn ranked(profile: &UserProfile) -> Vec<EligibilityResult> {
        EligibilityEngine::new(Arc::new(ScholarshipCatalog::reference()))
            .match_profile(profile)
            .expect("valid profile")
    }

    #[test]
    fn eligibility_report_lists_matches_then_reasons() {
        let profile = profile();
        let results = ranked(&profile);
        let report = render_eligibility(&profile, &results, false);

        assert!(report.contains("Eligible scholarships"));
        assert!(report.contains("68% match (fair)"));
        assert!(report.contains("Not eligible"));
        assert!(report.contains("Co-curricular score (7) is below the minimum required (8)."));
    }

    #[test]
    fn eligible_only_hides_rejections() {
        let profile = profile();
        let results = ranked(&profile);
        let report = render_eligibility(&profile, &results, true);

        assert!(!report.contains("Not eligible\n"));
        assert!(!report.contains("    * "));
    }

    #[test]
    fn catalog_listing_shows_every_entry() {
        let catalog = ScholarshipCatalog::reference();
        let listing = render_catalog(&catalog);

        assert!(listing.starts_with("Scholarship catalog (7 entries)"));
        assert_eq!(listing.matches("\n- ").count(), 7);
        assert!(listing.contains("no limit"));
    }

    #[test]
    fn essay_report_skips_empty_sections() {
        let analysis = EssayAnalysis {
            overall_score: 77,
            relevance_score: 80.0,
            vocabulary_score: 80,
            sentiment_score: 70.0,
            tone: "Confident".to_string(),
            feedback: vec!["Clear narrative.".to_string()],
            strengths: Vec::new(),
            improvements: vec!["Quantify impact.".to_string()],
        };
        let stats = VocabularyStats::measure("Engineering shapes resilient communities.");
        let report = render_essay(&analysis, 4, &stats);

        assert!(report.starts_with("Overall score: 77/100"));
        assert!(report.contains("tone: Confident"));
        assert!(report.contains("Improvements:\n  - Quantify impact."));
        assert!(!report.contains("Strengths:"));
    }
}
