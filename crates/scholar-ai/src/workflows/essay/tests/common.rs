use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::essay::semantic::{SemanticAnalyzer, SemanticAssessment, SemanticError};
use crate::workflows::essay::EssayScorer;

pub(super) const PROMPT: &str = "Why do you deserve this scholarship?";

pub(super) const ESSAY: &str = "Throughout my engineering degree I have pursued research on \
    sustainable water infrastructure. This scholarship would let me continue that work and \
    mentor younger students in my community.";

pub(super) fn assessment(relevance: f64, sentiment: f64) -> SemanticAssessment {
    SemanticAssessment {
        relevance,
        sentiment,
        tone: "Confident".to_string(),
        feedback: vec!["Answers the prompt directly.".to_string()],
        strengths: vec!["Concrete research focus".to_string()],
        improvements: vec!["Quantify community impact".to_string()],
    }
}

/// Returns a canned assessment and counts calls.
pub(super) struct FixedAnalyzer {
    assessment: SemanticAssessment,
    calls: AtomicUsize,
}

impl FixedAnalyzer {
    pub(super) fn new(assessment: SemanticAssessment) -> Self {
        Self {
            assessment,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SemanticAnalyzer for FixedAnalyzer {
    async fn analyze(
        &self,
        _essay: &str,
        _prompt: &str,
    ) -> Result<SemanticAssessment, SemanticError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.assessment.clone())
    }
}

/// Always fails as an unreachable service would.
pub(super) struct FailingAnalyzer;

#[async_trait]
impl SemanticAnalyzer for FailingAnalyzer {
    async fn analyze(
        &self,
        _essay: &str,
        _prompt: &str,
    ) -> Result<SemanticAssessment, SemanticError> {
        Err(SemanticError::Transport("connection refused".to_string()))
    }
}

pub(super) fn scorer_with(
    relevance: f64,
    sentiment: f64,
) -> (EssayScorer<FixedAnalyzer>, Arc<FixedAnalyzer>) {
    let analyzer = Arc::new(FixedAnalyzer::new(assessment(relevance, sentiment)));
    (EssayScorer::new(analyzer.clone()), analyzer)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
