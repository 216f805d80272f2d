//! Classification pipeline orchestrator

use crate::model::ClassificationVerdict;
use crate::service::conservative::{apply_conservative_checks, RiskKeywordSet};
use crate::service::extract::extract_verdict;
use crate::service::llm::{ModelError, VisionModel};
use crate::service::prompts::HALAL_PROMPT;

/// Failure taxonomy for a single classification attempt
///
/// Every variant is terminal for the invocation; nothing is retried
/// internally and no partial verdict is ever fabricated.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("No image provided")]
    NoImage,

    #[error("API credential not configured")]
    MissingCredential,

    #[error("AI analysis failed: {0}")]
    UpstreamFailure(String),

    #[error("Empty response from AI")]
    EmptyResponse,

    #[error("Malformed response from AI: {0}")]
    MalformedResponse(String),
}

impl From<ModelError> for ClassificationError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::MissingCredential => ClassificationError::MissingCredential,
            // Caller-side cancellation surfaces here as a transport error
            ModelError::Http(e) => ClassificationError::UpstreamFailure(e.to_string()),
            ModelError::Upstream { status, body } => {
                ClassificationError::UpstreamFailure(format!("HTTP {status}: {body}"))
            }
            ModelError::MalformedEnvelope(msg) => ClassificationError::MalformedResponse(msg),
            ModelError::EmptyResponse => ClassificationError::EmptyResponse,
        }
    }
}

/// Single entry point for the classification pipeline
///
/// Sequences model call, verdict extraction and conservative override,
/// short-circuiting on the first failure. The one outbound network call is
/// the only side effect.
pub struct ClassificationService {
    model: Box<dyn VisionModel>,
    risk_keywords: RiskKeywordSet,
}

impl ClassificationService {
    pub fn new(model: Box<dyn VisionModel>, risk_keywords: RiskKeywordSet) -> Self {
        Self {
            model,
            risk_keywords,
        }
    }

    /// Classify one product image, supplied as a data URI
    pub async fn analyze(
        &self,
        image: &str,
    ) -> Result<ClassificationVerdict, ClassificationError> {
        if image.trim().is_empty() {
            return Err(ClassificationError::NoImage);
        }

        let reply = self.model.classify_image(image, HALAL_PROMPT).await?;

        let verdict =
            extract_verdict(&reply).map_err(ClassificationError::MalformedResponse)?;

        tracing::debug!(
            status = %verdict.status,
            confidence = verdict.confidence,
            ingredients = verdict.detected_ingredients.len(),
            "Model verdict parsed"
        );

        Ok(apply_conservative_checks(verdict, &self.risk_keywords))
    }
}
