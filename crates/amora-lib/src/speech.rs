//! Speech synthesis — normalization, truncation, ElevenLabs client.
//!
//! Direct-synthesis integration: one POST, `audio/mpeg` bytes back. Unlike
//! the chat path, failures here surface as errors; the HTTP layer maps them
//! to statuses with generic messages.

use async_trait::async_trait;
use tracing::debug;

use amora_core::error::GatewayError;
use amora_core::normalize::{normalize, truncate_for_speech, SPEECH_CHAR_CAP};

use crate::config::GatewayConfig;
use crate::gemini::map_transport;

const MODEL_ID: &str = "eleven_monolingual_v1";

/// Synthesis abstraction the engine drives; production impl is
/// [`ElevenLabsClient`].
#[async_trait]
pub trait SpeechSynth: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, GatewayError>;
}

pub struct ElevenLabsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    voice_id: String,
    timeout: std::time::Duration,
}

impl ElevenLabsClient {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.elevenlabs_url.clone(),
            api_key: config.elevenlabs_api_key.clone(),
            voice_id: config.voice_id.clone(),
            timeout: config.speech_timeout,
        }
    }
}

#[async_trait]
impl SpeechSynth for ElevenLabsClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, GatewayError> {
        // Credential check happens before anything touches the network.
        let key = self
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingConfig("ELEVENLABS_API_KEY"))?;

        let url = format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id);
        let body = serde_json::json!({
            "text": text,
            "model_id": MODEL_ID,
            "voice_settings": { "stability": 0.3, "similarity_boost": 0.7 },
        });

        debug!(chars = text.chars().count(), "sending text-to-speech request");
        let resp = self
            .client
            .post(&url)
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", key)
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

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| GatewayError::RenderFailed(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

pub struct SpeechEngine {
    synth: std::sync::Arc<dyn SpeechSynth>,
}

impl SpeechEngine {
    pub fn new(synth: std::sync::Arc<dyn SpeechSynth>) -> Self {
        Self { synth }
    }

    /// Normalize, cap at [`SPEECH_CHAR_CAP`] chars, and synthesize.
    /// `EmptyInput` when nothing pronounceable is left after cleanup.
    pub async fn speak(&self, text: &str) -> Result<Vec<u8>, GatewayError> {
        let clean = normalize(text);
        if clean.is_empty() {
            return Err(GatewayError::EmptyInput);
        }

        let clean = truncate_for_speech(&clean, SPEECH_CHAR_CAP);
        self.synth.synthesize(&clean).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct FakeSynth {
        calls: AtomicUsize,
        inputs: Mutex<Vec<String>>,
    }

    impl FakeSynth {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                inputs: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SpeechSynth for FakeSynth {
        async fn synthesize(&self, text: &str) -> Result<Vec<u8>, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inputs.lock().unwrap().push(text.to_string());
            Ok(vec![0xFF, 0xFB])
        }
    }

    #[tokio::test]
    async fn empty_after_normalization_is_rejected() {
        let synth = FakeSynth::new();
        let engine = SpeechEngine::new(Arc::clone(&synth) as Arc<dyn SpeechSynth>);

        // Pure emoji normalizes to nothing.
        let result = engine.speak("😊🎉").await;
        assert!(matches!(result, Err(GatewayError::EmptyInput)));
        assert_eq!(synth.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn input_is_normalized_before_synthesis() {
        let synth = FakeSynth::new();
        let engine = SpeechEngine::new(Arc::clone(&synth) as Arc<dyn SpeechSynth>);

        engine.speak("thx 4 everything 😊").await.unwrap();

        let sent = synth.inputs.lock().unwrap()[0].clone();
        assert_eq!(sent, "thanks for everything");
    }

    #[tokio::test]
    async fn long_input_is_capped_with_ellipsis() {
        let synth = FakeSynth::new();
        let engine = SpeechEngine::new(Arc::clone(&synth) as Arc<dyn SpeechSynth>);

        let text = "word ".repeat(100);
        engine.speak(&text).await.unwrap();

        let sent = synth.inputs.lock().unwrap()[0].clone();
        assert_eq!(sent.chars().count(), SPEECH_CHAR_CAP + 3);
        assert!(sent.ends_with("..."));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        // Unroutable base URL: if the client ever tried the network this
        // would hang or error differently, not return MissingConfig.
        let config = GatewayConfig {
            elevenlabs_url: "http://127.0.0.1:1".into(),
            ..GatewayConfig::default()
        };
        let client = ElevenLabsClient::new(&config);

        let result = client.synthesize("hello").await;
        assert!(matches!(
            result,
            Err(GatewayError::MissingConfig("ELEVENLABS_API_KEY"))
        ));
    }
}
