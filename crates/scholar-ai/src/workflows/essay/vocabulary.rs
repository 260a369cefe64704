//! Deterministic vocabulary quality score.
//!
//! `raw = ttr * 40 + avg_len * 8 + academic_density * 200`, reported as
//! `min(round(raw * 1.2), 100)`. The coefficients are calibration constants shared with the
//! published scoring rubric; changing any of them changes every historical score.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Serialize;

use super::tokenizer::tokenize;

const TYPE_TOKEN_WEIGHT: f64 = 40.0;
const AVERAGE_LENGTH_WEIGHT: f64 = 8.0;
const ACADEMIC_DENSITY_WEIGHT: f64 = 200.0;
const SCALE: f64 = 1.2;
const MAX_SCORE: f64 = 100.0;
const LONG_WORD_THRESHOLD: usize = 7;

static ACADEMIC_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn academic_words() -> &'static HashSet<&'static str> {
    ACADEMIC_WORDS.get_or_init(|| {
        const WORDS: &[&str] = &[
            "analyze", "analysis", "approach", "assessment", "assume", "authority",
            "available", "benefit", "concept", "consistent", "constitutional", "context",
            "contract", "create", "data", "definition", "derived", "distribution",
            "economic", "environment", "established", "estimate", "evidence", "factors",
            "financial", "formula", "function", "identified", "income", "indicate",
            "individual", "interpretation", "involved", "issues", "labour", "legal",
            "legislation", "major", "method", "occur", "percent", "period", "policy",
            "principle", "procedure", "process", "required", "research", "response",
            "role", "section", "sector", "significant", "similar", "source", "specific",
            "structure", "theory", "variables",
        ];
        WORDS.iter().copied().collect()
    })
}

fn is_academic(token: &str) -> bool {
    token.len() > LONG_WORD_THRESHOLD || academic_words().contains(token)
}

/// Intermediate lexical metrics behind the vocabulary score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VocabularyStats {
    pub token_count: usize,
    pub type_token_ratio: f64,
    pub average_token_length: f64,
    pub academic_density: f64,
}

impl VocabularyStats {
    /// Measure the full token stream; stop words count toward diversity.
    pub fn measure(essay: &str) -> Self {
        let tokens = tokenize(essay, false);
        if tokens.is_empty() {
            return Self {
                token_count: 0,
                type_token_ratio: 0.0,
                average_token_length: 0.0,
                academic_density: 0.0,
            };
        }

        let total = tokens.len() as f64;
        let distinct = tokens.iter().map(String::as_str).collect::<HashSet<_>>().len();
        let characters: usize = tokens.iter().map(String::len).sum();
        let academic = tokens.iter().filter(|token| is_academic(token)).count();

        Self {
            token_count: tokens.len(),
            type_token_ratio: distinct as f64 / total,
            average_token_length: characters as f64 / total,
            academic_density: academic as f64 / total,
        }
    }

    pub fn score(&self) -> u8 {
        if self.token_count == 0 {
            return 0;
        }

        let raw = self.type_token_ratio * TYPE_TOKEN_WEIGHT
            + self.average_token_length * AVERAGE_LENGTH_WEIGHT
            + self.academic_density * ACADEMIC_DENSITY_WEIGHT;
        (raw * SCALE).round().min(MAX_SCORE) as u8
    }
}

/// 0-100 vocabulary score for an essay; empty text scores 0.
pub fn score_vocabulary(essay: &str) -> u8 {
    VocabularyStats::measure(essay).score()
}
