use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::semantic::{SemanticAnalyzer, SemanticAssessment, SemanticError};
use super::vocabulary::score_vocabulary;

const RELEVANCE_WEIGHT: f64 = 0.45;
const VOCABULARY_WEIGHT: f64 = 0.25;
const SENTIMENT_WEIGHT: f64 = 0.30;
const LOW_RELEVANCE_THRESHOLD: f64 = 30.0;
const OFF_TOPIC_VOCABULARY_CAP: u8 = 40;

/// Composite analysis of one essay against one prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EssayAnalysis {
    pub overall_score: u8,
    pub relevance_score: f64,
    pub vocabulary_score: u8,
    pub sentiment_score: f64,
    pub tone: String,
    pub feedback: Vec<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EssayField {
    Essay,
    Prompt,
}

impl fmt::Display for EssayField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EssayField::Essay => f.write_str("essay"),
            EssayField::Prompt => f.write_str("prompt"),
        }
    }
}

/// Error raised by the hybrid essay scorer.
#[derive(Debug, thiserror::Error)]
pub enum EssayScoringError {
    #[error("{0} must not be empty")]
    InvalidInput(EssayField),
    #[error("AI service unavailable: {0}")]
    ServiceUnavailable(#[source] SemanticError),
}

/// Hybrid scorer blending local vocabulary statistics with the semantic service.
pub struct EssayScorer<S> {
    analyzer: Arc<S>,
}

impl<S> EssayScorer<S>
where
    S: SemanticAnalyzer + 'static,
{
    pub fn new(analyzer: Arc<S>) -> Self {
        Self { analyzer }
    }

    /// Score an essay. Either a complete analysis comes back or an error does.
    pub async fn analyze_essay(
        &self,
        essay: &str,
        prompt: &str,
    ) -> Result<EssayAnalysis, EssayScoringError> {
        if essay.trim().is_empty() {
            return Err(EssayScoringError::InvalidInput(EssayField::Essay));
        }
        if prompt.trim().is_empty() {
            return Err(EssayScoringError::InvalidInput(EssayField::Prompt));
        }

        let stats_vocabulary = score_vocabulary(essay);

        let assessment = self
            .analyzer
            .analyze(essay, prompt)
            .await
            .map_err(|err| {
                warn!(error = %err, "semantic analysis failed; discarding essay analysis");
                EssayScoringError::ServiceUnavailable(err)
            })?;

        let analysis = merge(stats_vocabulary, assessment);
        debug!(
            overall = analysis.overall_score,
            relevance = analysis.relevance_score,
            vocabulary = analysis.vocabulary_score,
            sentiment = analysis.sentiment_score,
            "essay analysis complete"
        );
        Ok(analysis)
    }
}

/// Vocabulary credit for an essay, capped when the service judged it off-topic.
pub(crate) fn adjusted_vocabulary(stats_vocabulary: u8, relevance: f64) -> u8 {
    if relevance < LOW_RELEVANCE_THRESHOLD {
        stats_vocabulary.min(OFF_TOPIC_VOCABULARY_CAP)
    } else {
        stats_vocabulary
    }
}

pub(crate) fn merge(stats_vocabulary: u8, assessment: SemanticAssessment) -> EssayAnalysis {
    let SemanticAssessment {
        relevance,
        sentiment,
        tone,
        feedback,
        strengths,
        improvements,
    } = assessment;

    let vocabulary = adjusted_vocabulary(stats_vocabulary, relevance);
    let overall = relevance * RELEVANCE_WEIGHT
        + f64::from(vocabulary) * VOCABULARY_WEIGHT
        + sentiment * SENTIMENT_WEIGHT;

    EssayAnalysis {
        overall_score: overall.round().clamp(0.0, 100.0) as u8,
        relevance_score: relevance,
        vocabulary_score: vocabulary,
        sentiment_score: sentiment,
        tone,
        feedback,
        strengths,
        improvements,
    }
}
