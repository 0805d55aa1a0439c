//! Gemini `generateContent` client.
//!
//! Thin transport layer: one prompt in, one reply string out. Prompt
//! assembly and fallback policy live in [`crate::chat`].

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use amora_core::error::GatewayError;

use crate::config::GatewayConfig;

const MODEL: &str = "gemini-2.0-flash";

/// Language-model abstraction the chat engine talks to.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: std::time::Duration,
}

impl GeminiClient {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.gemini_url.clone(),
            api_key: config.gemini_api_key.clone(),
            timeout: config.chat_timeout,
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingConfig("GEMINI_API_KEY"))?;

        let url = format!(
            "{}/v1beta/models/{MODEL}:generateContent?key={key}",
            self.base_url
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        debug!(model = MODEL, "sending generateContent request");
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(map_transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| GatewayError::RenderFailed(e.to_string()))?;
        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .filter(|t| !t.is_empty());

        // 200 with no usable candidate is still an upstream failure.
        text.ok_or_else(|| GatewayError::RenderFailed("no candidates in response".into()))
    }
}

/// Map reqwest failures onto the gateway taxonomy.
pub(crate) fn map_transport(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Network(err.to_string())
    }
}
