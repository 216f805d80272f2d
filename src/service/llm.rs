//! Vision model client for the OpenRouter chat completions API

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Environment variable holding the upstream API credential
pub const ENV_OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";

/// Whether the upstream credential is present and non-empty
pub fn credential_configured() -> bool {
    OpenRouterClient::api_key().is_some()
}

/// Near-deterministic decoding: the reply should be a fixed-schema JSON object
const TEMPERATURE: f64 = 0.1;
/// Generous ceiling for one JSON object plus a short preamble
const MAX_TOKENS: u32 = 2048;

/// Identification headers required by OpenRouter
const HTTP_REFERER: &str = "https://halalscan.vercel.app";
const APP_TITLE: &str = "Halal Scan Web";

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("API credential not configured ({ENV_OPENROUTER_API_KEY})")]
    MissingCredential,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to parse upstream response envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Empty response from model")]
    EmptyResponse,
}

/// Seam between the pipeline and the upstream model transport
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Send one image with the given prompt and return the raw reply text
    async fn classify_image(&self, image: &str, prompt: &str) -> Result<String, ModelError>;
}

/// Chat completions client for OpenRouter-hosted vision models
pub struct OpenRouterClient {
    client: Client,
    model: String,
}

impl OpenRouterClient {
    pub fn new(model: String) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("halal-scan-api/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| Client::new()),
            model,
        }
    }

    /// Credential is read per request so it can be provisioned or rotated
    /// without a restart; absence fails the request, never the process.
    fn api_key() -> Option<String> {
        env::var(ENV_OPENROUTER_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Build the single-turn multimodal request body
fn request_body(model: &str, image: &str, prompt: &str) -> Value {
    serde_json::json!({
        "model": model,
        "messages": [
            {
                "role": "user",
                "content": [
                    {
                        "type": "image_url",
                        "image_url": { "url": image },
                    },
                    {
                        "type": "text",
                        "text": prompt,
                    },
                ],
            },
        ],
        "temperature": TEMPERATURE,
        "max_tokens": MAX_TOKENS,
    })
}

/// Pull the reply text out of the chat completion envelope
fn reply_text(envelope: &Value) -> Option<String> {
    envelope
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .filter(|text| !text.trim().is_empty())
        .map(|text| text.to_string())
}

#[async_trait]
impl VisionModel for OpenRouterClient {
    async fn classify_image(&self, image: &str, prompt: &str) -> Result<String, ModelError> {
        let api_key = Self::api_key().ok_or(ModelError::MissingCredential)?;

        tracing::debug!(model = %self.model, "Sending classification request");

        let response = self
            .client
            .post(OPENROUTER_URL)
            .bearer_auth(api_key)
            .header("HTTP-Referer", HTTP_REFERER)
            .header("X-Title", APP_TITLE)
            .json(&request_body(&self.model, image, prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Upstream model request failed");
            return Err(ModelError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| ModelError::MalformedEnvelope(e.to_string()))?;

        reply_text(&envelope).ok_or(ModelError::EmptyResponse)
    }
}
