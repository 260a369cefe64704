//! Gemini `generateContent` adapter for the semantic-analysis capability.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::semantic::{SemanticAnalyzer, SemanticAssessment, SemanticError};
use crate::config::SemanticServiceConfig;

const USER_TURN: &str = "Analyze this essay.";

/// HTTP client for the Gemini generative language API.
pub struct GeminiClient {
    api_key: String,
    config: SemanticServiceConfig,
    client: Client,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiClient {
    pub fn new(config: SemanticServiceConfig) -> Result<Self, SemanticError> {
        let api_key = config.api_key.clone().ok_or(SemanticError::NotConfigured)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| SemanticError::Transport(err.to_string()))?;

        Ok(Self {
            api_key,
            config,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn map_send_error(&self, err: reqwest::Error) -> SemanticError {
        if err.is_timeout() {
            SemanticError::Timeout(self.config.timeout)
        } else {
            SemanticError::Transport(err.to_string())
        }
    }
}

/// Evaluator role and scoring tasks sent as the system instruction.
pub fn evaluator_instruction(essay: &str, prompt: &str) -> String {
    format!(
        "You are an expert scholarship essay evaluator.\n\
         Your goal is to evaluate student essays based on Relevance, Tone, and Quality.\n\
         \n\
         You must return a strictly formatted JSON object.\n\
         \n\
         Tasks:\n\
         1. Check if the essay ACTUALLY answers the prompt. If it is gibberish or unrelated, give a very low Relevance score (< 20).\n\
         2. Analyze the sentiment: Is it confident/optimistic?\n\
         3. Provide constructive feedback.\n\
         \n\
         Input:\n\
         Prompt: \"{prompt}\"\n\
         Essay: \"{essay}\""
    )
}

/// Structured-output schema every response must satisfy.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "aiRelevanceScore": {
                "type": "NUMBER",
                "description": "0-100 score based on how well it answers the specific prompt."
            },
            "aiSentimentScore": {
                "type": "NUMBER",
                "description": "0-100 score on confidence and positivity."
            },
            "tone": { "type": "STRING", "description": "1-2 words describing the tone." },
            "feedback": { "type": "ARRAY", "items": { "type": "STRING" } },
            "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
            "improvements": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": [
            "aiRelevanceScore",
            "aiSentimentScore",
            "tone",
            "feedback",
            "strengths",
            "improvements"
        ]
    })
}

pub(crate) fn request_body(essay: &str, prompt: &str) -> Value {
    json!({
        "systemInstruction": {
            "parts": [{ "text": evaluator_instruction(essay, prompt) }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": USER_TURN }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

#[async_trait]
impl SemanticAnalyzer for GeminiClient {
    async fn analyze(
        &self,
        essay: &str,
        prompt: &str,
    ) -> Result<SemanticAssessment, SemanticError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(essay, prompt))
            .send()
            .await
            .map_err(|err| self.map_send_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SemanticError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| SemanticError::MalformedPayload(err.to_string()))?;
        let text = envelope.into_text().ok_or(SemanticError::EmptyResponse)?;
        debug!(model = %self.config.model, bytes = text.len(), "semantic analysis received");

        SemanticAssessment::from_json(&text)
    }
}
