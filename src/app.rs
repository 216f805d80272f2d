//! Application state and service initialization

use std::sync::Arc;

use crate::model::Config;
use crate::service::{ClassificationService, OpenRouterClient, RiskKeywordSet};

/// Application state injected into Actix-web handlers
pub struct AppState {
    /// Classification pipeline entry point
    pub classification: Arc<ClassificationService>,
}

impl AppState {
    /// Build the service graph from configuration
    ///
    /// The model credential is checked per request, not here; a missing key
    /// only logs a warning so the service can start and report readiness.
    pub fn new(config: &Config) -> Self {
        if !crate::service::llm::credential_configured() {
            tracing::warn!(
                "{} not set, analyze requests will fail until it is configured",
                crate::service::llm::ENV_OPENROUTER_API_KEY
            );
        }

        let model = OpenRouterClient::new(config.model.clone());
        let risk_keywords = RiskKeywordSet::new(&config.risk_keywords);

        Self {
            classification: Arc::new(ClassificationService::new(Box::new(model), risk_keywords)),
        }
    }
}
