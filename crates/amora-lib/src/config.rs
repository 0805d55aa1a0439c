//! Gateway configuration.
//!
//! Keys come from the environment once at startup; everything downstream
//! receives an explicit [`GatewayConfig`] instead of reading globals.

use std::time::Duration;

/// Configuration for both upstream integrations.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub gemini_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
    pub gemini_url: String,
    pub elevenlabs_url: String,
    pub voice_id: String,
    pub chat_timeout: Duration,
    pub speech_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            elevenlabs_api_key: None,
            gemini_url: "https://generativelanguage.googleapis.com".into(),
            elevenlabs_url: "https://api.elevenlabs.io".into(),
            voice_id: "JBFqnCBsd6RMkjVDRZzb".into(),
            chat_timeout: Duration::from_secs(30),
            speech_timeout: Duration::from_secs(10),
        }
    }
}

impl GatewayConfig {
    /// Read API keys from `GEMINI_API_KEY` / `ELEVENLABS_API_KEY`.
    /// Absent or empty variables leave the key unset; the engines report
    /// the gap at call time rather than at startup.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env_nonempty("GEMINI_API_KEY"),
            elevenlabs_api_key: env_nonempty("ELEVENLABS_API_KEY"),
            ..Self::default()
        }
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_keys() {
        let config = GatewayConfig::default();
        assert!(config.gemini_api_key.is_none());
        assert!(config.elevenlabs_api_key.is_none());
    }

    #[test]
    fn default_timeouts() {
        let config = GatewayConfig::default();
        assert_eq!(config.chat_timeout, Duration::from_secs(30));
        assert_eq!(config.speech_timeout, Duration::from_secs(10));
    }
}
