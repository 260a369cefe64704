use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::scorer::{EssayAnalysis, EssayScorer, EssayScoringError};
use super::semantic::SemanticAnalyzer;
use super::tokenizer::word_count;
use super::vocabulary::VocabularyStats;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssayAnalysisRequest {
    pub essay: String,
    pub prompt: String,
}

/// Analysis plus the local statistics behind the vocabulary score.
#[derive(Debug, Clone, Serialize)]
pub struct EssayAnalysisResponse {
    #[serde(flatten)]
    pub analysis: EssayAnalysis,
    pub word_count: usize,
    pub vocabulary_stats: VocabularyStats,
}

/// Router builder exposing the hybrid essay scorer.
pub fn essay_router<S>(scorer: Arc<EssayScorer<S>>) -> Router
where
    S: SemanticAnalyzer + 'static,
{
    Router::new()
        .route("/api/v1/essays/analysis", post(analysis_handler::<S>))
        .with_state(scorer)
}

pub(crate) async fn analysis_handler<S>(
    State(scorer): State<Arc<EssayScorer<S>>>,
    axum::Json(request): axum::Json<EssayAnalysisRequest>,
) -> Response
where
    S: SemanticAnalyzer + 'static,
{
    match scorer.analyze_essay(&request.essay, &request.prompt).await {
        Ok(analysis) => {
            let response = EssayAnalysisResponse {
                analysis,
                word_count: word_count(&request.essay),
                vocabulary_stats: VocabularyStats::measure(&request.essay),
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(EssayScoringError::InvalidInput(field)) => {
            let payload = json!({
                "error": format!("{field} must not be empty"),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(EssayScoringError::ServiceUnavailable(_)) => {
            let payload = json!({
                "error": "AI service unavailable. Please check your connection or API key.",
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
