use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Judgement returned by the external semantic-analysis service.
///
/// Field names follow the service's response schema; every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticAssessment {
    #[serde(rename = "aiRelevanceScore")]
    pub relevance: f64,
    #[serde(rename = "aiSentimentScore")]
    pub sentiment: f64,
    pub tone: String,
    pub feedback: Vec<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl SemanticAssessment {
    /// Parse and validate a raw JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, SemanticError> {
        let assessment: SemanticAssessment = serde_json::from_str(payload)
            .map_err(|err| SemanticError::MalformedPayload(err.to_string()))?;
        assessment.validated()
    }

    /// Scores must be finite and on the 0-100 scale.
    pub fn validated(self) -> Result<Self, SemanticError> {
        for (field, value) in [
            ("aiRelevanceScore", self.relevance),
            ("aiSentimentScore", self.sentiment),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(SemanticError::ScoreOutOfRange { field, value });
            }
        }
        Ok(self)
    }
}

/// Failure talking to, or understanding, the semantic-analysis service.
#[derive(Debug, thiserror::Error)]
pub enum SemanticError {
    #[error("semantic analysis service is not configured")]
    NotConfigured,
    #[error("semantic analysis request failed: {0}")]
    Transport(String),
    #[error("semantic analysis timed out after {0:?}")]
    Timeout(Duration),
    #[error("semantic analysis service responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("semantic analysis service returned no content")]
    EmptyResponse,
    #[error("semantic analysis payload did not match the expected schema: {0}")]
    MalformedPayload(String),
    #[error("semantic analysis score `{field}` out of range: {value}")]
    ScoreOutOfRange { field: &'static str, value: f64 },
}

/// Capability judging an essay's relevance, sentiment, and tone against its prompt.
#[async_trait]
pub trait SemanticAnalyzer: Send + Sync {
    async fn analyze(&self, essay: &str, prompt: &str)
        -> Result<SemanticAssessment, SemanticError>;
}
