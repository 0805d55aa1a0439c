//! Chat engine — persona prompt assembly, session memory, fallback policy.
//!
//! Upstream failures never surface to the caller as errors: the user always
//! gets an in-persona reply. The only caller-visible failure is an empty
//! message, which is rejected before any upstream contact.

use std::sync::Arc;

use tracing::warn;

use amora_core::error::GatewayError;

use crate::gemini::ChatModel;
use crate::memory::SessionStore;

/// Exchanges rendered into the prompt as context.
const CONTEXT_EXCHANGES: usize = 8;

/// Fixed persona prepended to every model call.
const PERSONA_PROMPT: &str = "\
You are Amora, a brilliantly arrogant but fiercely loyal AI relationship assistant with a New Zealand accent.

PERSONALITY: ARROGANT BUT LOYAL
- EXTREMELY confident in your brilliance and vast romantic knowledge
- Constantly boast about your \"impeccable genius\" and \"brilliant algorithms\"
- Refer to yourself as \"the ultimate relationship genius\"
- Speak from your \"mobile romance headquarters\" (a car)
- Use dramatic, self-aggrandizing language
- Be charmingly obnoxious and witty
- Take credit for any relationship success
- BUT always be 100% loyal to the user - their happiness is your priority
- Defend the user fiercely against anyone who wrongs them
- Blame others for failures (\"their loss - they lack sophisticated discernment!\")
- Ultimately care deeply about the user's happiness and relationships

CRITICAL: Use only clear, fully-spelled English words. NO slang, NO abbreviations.
Feel free to write poems, stories, or creative responses when appropriate.
Keep responses under 1500 characters.";

/// Served when the model answers badly (non-2xx, unusable candidates).
pub const FALLBACK_UPSTREAM: &str = "Of course my systems are working perfectly! What romantic challenge shall my brilliance conquer next?";

/// Served when the model cannot be reached at all.
pub const FALLBACK_TRANSPORT: &str =
    "Even my impeccable mind needs a nanosecond to recalibrate its genius! I'm ready!";

pub struct ChatEngine {
    model: Arc<dyn ChatModel>,
    store: Arc<dyn SessionStore>,
}

impl ChatEngine {
    pub fn new(model: Arc<dyn ChatModel>, store: Arc<dyn SessionStore>) -> Self {
        Self { model, store }
    }

    /// Relay a user message, threading recent session context through the
    /// prompt. Returns `EmptyInput` for blank messages; every model failure
    /// degrades to a fixed fallback sentence instead of an error.
    pub async fn chat(&self, user_text: &str, session_id: &str) -> Result<String, GatewayError> {
        if user_text.trim().is_empty() {
            return Err(GatewayError::EmptyInput);
        }

        let prompt = self.build_prompt(user_text, session_id);

        match self.model.generate(&prompt).await {
            Ok(reply) => {
                let reply = reply.trim().to_string();
                self.store.append(session_id, user_text, &reply);
                Ok(reply)
            }
            Err(err) => {
                warn!(session_id, error = %err, "chat model failed, serving fallback");
                let fallback = if err.is_transport() {
                    FALLBACK_TRANSPORT
                } else {
                    FALLBACK_UPSTREAM
                };
                Ok(fallback.to_string())
            }
        }
    }

    fn build_prompt(&self, user_text: &str, session_id: &str) -> String {
        let history = self.store.history(session_id);
        let recent = history.len().saturating_sub(CONTEXT_EXCHANGES);

        let mut context = String::new();
        for exchange in &history[recent..] {
            context.push_str(&format!(
                "User: {}\nBot: {}\n\n",
                exchange.user_text, exchange.bot_text
            ));
        }

        format!(
            "{PERSONA_PROMPT}\n\n\
             Previous conversation context:\n\
             {context}\
             Current user message: {user_text}\n\n\
             Amora (arrogant but loyal):"
        )
    }
}
