//! Hybrid essay scoring against in-process fakes and a local stand-in for the Gemini API.

mod common {
    use std::net::SocketAddr;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use scholar_ai::config::SemanticServiceConfig;
    use scholar_ai::workflows::essay::{SemanticAnalyzer, SemanticAssessment, SemanticError};

    pub(super) const PROMPT: &str = "Why do you deserve this scholarship?";
    pub(super) const ESSAY: &str = "Engineering gives me the discipline to design sustainable \
        infrastructure. I volunteer with my community and lead projects that demonstrate \
        responsibility, leadership, and a commitment to excellence.";

    pub(super) fn assessment(relevance: f64, sentiment: f64) -> SemanticAssessment {
        SemanticAssessment {
            relevance,
            sentiment,
            tone: "Confident".to_string(),
            feedback: vec!["Answers the prompt directly.".to_string()],
            strengths: vec!["Concrete examples".to_string()],
            improvements: vec!["Mention measurable outcomes".to_string()],
        }
    }

    /// Records every prompt it is asked about.
    pub(super) struct RecordingAnalyzer {
        pub(super) reply: SemanticAssessment,
        pub(super) prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SemanticAnalyzer for RecordingAnalyzer {
        async fn analyze(
            &self,
            _essay: &str,
            prompt: &str,
        ) -> Result<SemanticAssessment, SemanticError> {
            self.prompts
                .lock()
                .expect("prompt log poisoned")
                .push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    /// Serves `status` with `payload` on the generateContent route and returns the base URL.
    pub(super) async fn fake_gemini(status: StatusCode, payload: Value) -> String {
        let app = Router::new().route(
            "/v1beta/models/:target",
            post(move |Path(target): Path<String>, headers: HeaderMap, Json(body): Json<Value>| {
                let payload = payload.clone();
                async move {
                    let keyed = headers
                        .get("x-goog-api-key")
                        .and_then(|value| value.to_str().ok())
                        == Some("test-key");
                    let well_formed = target == "gemini-test:generateContent"
                        && body["generationConfig"]["responseMimeType"] == "application/json";
                    if keyed && well_formed {
                        (status, Json(payload))
                    } else {
                        (
                            StatusCode::BAD_REQUEST,
                            Json(json!({ "error": { "message": "unexpected request" } })),
                        )
                    }
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind fake server");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    pub(super) fn service_config(api_url: String) -> SemanticServiceConfig {
        let mut config = SemanticServiceConfig::new("test-key");
        config.api_url = api_url;
        config.model = "gemini-test".to_string();
        config
    }

    pub(super) fn envelope(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }
}

use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use serde_json::json;

use scholar_ai::workflows::essay::{
    score_vocabulary, EssayScorer, EssayScoringError, GeminiClient, SemanticError,
};

#[tokio::test]
async fn on_topic_essay_blends_all_three_signals() {
    let analyzer = Arc::new(common::RecordingAnalyzer {
        reply: common::assessment(90.0, 80.0),
        prompts: Mutex::new(Vec::new()),
    });
    let scorer = EssayScorer::new(analyzer.clone());

    let analysis = scorer
        .analyze_essay(common::ESSAY, common::PROMPT)
        .await
        .expect("analysis succeeds");

    let vocabulary = score_vocabulary(common::ESSAY);
    let expected = (90.0 * 0.45 + f64::from(vocabulary) * 0.25 + 80.0 * 0.30_f64).round() as u8;
    assert_eq!(analysis.vocabulary_score, vocabulary);
    assert_eq!(analysis.overall_score, expected);
    assert_eq!(analysis.tone, "Confident");
    assert_eq!(
        *analyzer.prompts.lock().expect("prompt log poisoned"),
        vec![common::PROMPT.to_string()]
    );
}

#[tokio::test]
async fn off_topic_essay_loses_vocabulary_credit() {
    let analyzer = Arc::new(common::RecordingAnalyzer {
        reply: common::assessment(10.0, 60.0),
        prompts: Mutex::new(Vec::new()),
    });
    let scorer = EssayScorer::new(analyzer);

    let analysis = scorer
        .analyze_essay(common::ESSAY, "Describe your favourite recipe.")
        .await
        .expect("analysis succeeds");

    assert!(analysis.vocabulary_score <= 40);
    assert!(analysis.overall_score < 50);
}

#[tokio::test]
async fn gemini_client_parses_structured_output() {
    let text = json!({
        "aiRelevanceScore": 84,
        "aiSentimentScore": 72,
        "tone": "Optimistic",
        "feedback": ["Strong opening."],
        "strengths": ["Leadership"],
        "improvements": ["Add a closing summary"]
    })
    .to_string();
    let base = common::fake_gemini(StatusCode::OK, common::envelope(&text)).await;
    let client = GeminiClient::new(common::service_config(base)).expect("client builds");
    let scorer = EssayScorer::new(Arc::new(client));

    let analysis = scorer
        .analyze_essay(common::ESSAY, common::PROMPT)
        .await
        .expect("analysis succeeds");

    assert_eq!(analysis.relevance_score, 84.0);
    assert_eq!(analysis.sentiment_score, 72.0);
    assert_eq!(analysis.tone, "Optimistic");
    assert_eq!(analysis.improvements, vec!["Add a closing summary".to_string()]);
}

#[tokio::test]
async fn gemini_error_status_makes_service_unavailable() {
    let base = common::fake_gemini(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": { "code": 500, "message": "backend error" } }),
    )
    .await;
    let client = GeminiClient::new(common::service_config(base)).expect("client builds");
    let scorer = EssayScorer::new(Arc::new(client));

    match scorer.analyze_essay(common::ESSAY, common::PROMPT).await {
        Err(EssayScoringError::ServiceUnavailable(SemanticError::Status { status, body })) => {
            assert_eq!(status, 500);
            assert!(body.contains("backend error"));
        }
        other => panic!("expected status failure, got {other:?}"),
    }
}

#[tokio::test]
async fn gemini_payload_missing_fields_is_rejected() {
    let text = json!({ "aiRelevanceScore": 84, "tone": "Flat" }).to_string();
    let base = common::fake_gemini(StatusCode::OK, common::envelope(&text)).await;
    let client = GeminiClient::new(common::service_config(base)).expect("client builds");
    let scorer = EssayScorer::new(Arc::new(client));

    assert!(matches!(
        scorer.analyze_essay(common::ESSAY, common::PROMPT).await,
        Err(EssayScoringError::ServiceUnavailable(
            SemanticError::MalformedPayload(_)
        ))
    ));
}

#[tokio::test]
async fn gemini_blocked_prompt_has_no_content() {
    let base = common::fake_gemini(
        StatusCode::OK,
        json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
    )
    .await;
    let client = GeminiClient::new(common::service_config(base)).expect("client builds");
    let scorer = EssayScorer::new(Arc::new(client));

    assert!(matches!(
        scorer.analyze_essay(common::ESSAY, common::PROMPT).await,
        Err(EssayScoringError::ServiceUnavailable(
            SemanticError::EmptyResponse
        ))
    ));
}
