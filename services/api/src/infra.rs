use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use scholar_ai::config::SemanticServiceConfig;
use scholar_ai::workflows::eligibility::{Programme, YearOfStudy};
use scholar_ai::workflows::essay::{
    GeminiClient, SemanticAnalyzer, SemanticAssessment, SemanticError,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Semantic analyzer selected from configuration.
///
/// Without an API key the service still starts; essay analysis then fails with
/// `SemanticError::NotConfigured` and surfaces as unavailable.
pub(crate) enum ConfiguredAnalyzer {
    Gemini(GeminiClient),
    Unconfigured,
}

impl ConfiguredAnalyzer {
    pub(crate) fn from_config(config: &SemanticServiceConfig) -> Self {
        match GeminiClient::new(config.clone()) {
            Ok(client) => Self::Gemini(client),
            Err(SemanticError::NotConfigured) => {
                warn!("GEMINI_API_KEY not set; essay analysis disabled");
                Self::Unconfigured
            }
            Err(err) => {
                warn!(error = %err, "semantic client could not be built; essay analysis disabled");
                Self::Unconfigured
            }
        }
    }

    pub(crate) fn model(&self) -> Option<&str> {
        match self {
            Self::Gemini(client) => Some(client.model()),
            Self::Unconfigured => None,
        }
    }
}

#[async_trait]
impl SemanticAnalyzer for ConfiguredAnalyzer {
    async fn analyze(
        &self,
        essay: &str,
        prompt: &str,
    ) -> Result<SemanticAssessment, SemanticError> {
        match self {
            Self::Gemini(client) => client.analyze(essay, prompt).await,
            Self::Unconfigured => Err(SemanticError::NotConfigured),
        }
    }
}

pub(crate) fn parse_programme(value: &str) -> Result<Programme, String> {
    Programme::from_label(value).ok_or_else(|| {
        let options: Vec<&str> = Programme::ALL.iter().map(|p| p.label()).collect();
        format!("unknown programme '{value}' (expected one of: {})", options.join(", "))
    })
}

pub(crate) fn parse_year(value: &str) -> Result<YearOfStudy, String> {
    YearOfStudy::from_label(value).ok_or_else(|| {
        let options: Vec<&str> = YearOfStudy::ALL.iter().map(|y| y.label()).collect();
        format!("unknown year '{value}' (expected one of: {})", options.join(", "))
    })
}
