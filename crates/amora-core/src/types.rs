//! Shared types for the amora gateway.

use std::time::SystemTime;

/// One user-message/bot-reply pair. Immutable once recorded.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user_text: String,
    pub bot_text: String,
    pub timestamp: SystemTime,
}

/// Session id used when a client does not supply one.
pub const DEFAULT_SESSION_ID: &str = "default";
