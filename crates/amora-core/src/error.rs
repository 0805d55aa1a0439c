//! Error taxonomy shared by the chat and speech paths.
//!
//! Upstream detail (status + body) travels inside the variant so handlers
//! can log it; client-facing messages stay generic.

use thiserror::Error;

/// Everything that can go wrong talking to, or preparing input for, an
/// upstream API.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Input was empty (possibly after normalization).
    #[error("empty input")]
    EmptyInput,

    /// A required API credential is not configured.
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    /// Upstream returned a non-2xx status.
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Upstream answered 2xx but the payload could not be used.
    #[error("render failed: {0}")]
    RenderFailed(String),

    /// Upstream did not answer within the deadline.
    #[error("upstream timed out")]
    Timeout,

    /// Transport-level failure (DNS, connect, TLS, broken stream).
    #[error("network error: {0}")]
    Network(String),
}

impl GatewayError {
    /// True for failures originating on the wire rather than in the request
    /// itself. The chat engine uses this to pick its fallback sentence.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network(_))
    }
}
