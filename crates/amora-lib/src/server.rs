//! HTTP API for the amora gateway.
//!
//! CORS-permissive so a browser frontend can call from another origin.
//! Chat never returns an upstream failure to the client; speech failures map
//! to statuses with generic messages while detail goes to the log.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::error;

use amora_core::error::GatewayError;
use amora_core::types::DEFAULT_SESSION_ID;

use crate::chat::ChatEngine;
use crate::config::GatewayConfig;
use crate::gemini::GeminiClient;
use crate::memory::{InMemoryStore, SessionStore};
use crate::speech::{ElevenLabsClient, SpeechEngine};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatEngine>,
    pub speech: Arc<SpeechEngine>,
    pub store: Arc<dyn SessionStore>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    /// Wire production clients from a config.
    pub fn new(config: GatewayConfig) -> Self {
        let store: Arc<dyn SessionStore> = Arc::new(InMemoryStore::new());
        let model = Arc::new(GeminiClient::new(&config));
        let synth = Arc::new(ElevenLabsClient::new(&config));
        Self {
            chat: Arc::new(ChatEngine::new(model, Arc::clone(&store))),
            speech: Arc::new(SpeechEngine::new(synth)),
            store,
            config: Arc::new(config),
        }
    }
}

/// Build the axum router with shared [`AppState`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(diagnostics))
        .route("/chat", post(chat))
        .route("/generate-speech", post(generate_speech))
        .route("/health", get(health))
        .route("/clear-memory", post(clear_memory))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Speech-path error mapped to an HTTP response. Generic message out,
/// detail logged here.
struct ApiError(GatewayError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GatewayError::EmptyInput => (StatusCode::BAD_REQUEST, "no usable text in request"),
            GatewayError::MissingConfig(var) => {
                error!(var, "synthesis credential not configured");
                (StatusCode::INTERNAL_SERVER_ERROR, "speech synthesis is not configured")
            }
            GatewayError::Upstream { status, body } => {
                error!(status, body = %body, "upstream rejected synthesis request");
                (StatusCode::BAD_GATEWAY, "speech synthesis failed upstream")
            }
            GatewayError::RenderFailed(detail) => {
                error!(detail = %detail, "could not use synthesized audio");
                (StatusCode::BAD_GATEWAY, "speech synthesis failed upstream")
            }
            GatewayError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "speech synthesis timed out"),
            GatewayError::Network(detail) => {
                error!(detail = %detail, "could not reach synthesis service");
                (StatusCode::BAD_GATEWAY, "could not reach speech synthesis")
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

#[derive(serde::Serialize)]
struct DiagnosticsResponse {
    elevenlabs_key_exists: bool,
    gemini_key_exists: bool,
    elevenlabs_key_length: usize,
    gemini_key_length: usize,
}

async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let eleven = state.config.elevenlabs_api_key.as_deref().unwrap_or("");
    let gemini = state.config.gemini_api_key.as_deref().unwrap_or("");
    Json(DiagnosticsResponse {
        elevenlabs_key_exists: !eleven.is_empty(),
        gemini_key_exists: !gemini.is_empty(),
        elevenlabs_key_length: eleven.len(),
        gemini_key_length: gemini.len(),
    })
}

#[derive(serde::Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(serde::Serialize)]
struct ChatResponse {
    success: bool,
    response: String,
    session_id: String,
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session_id = req.session_id.unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());
    let reply = state.chat.chat(&req.message, &session_id).await.map_err(ApiError)?;
    Ok(Json(ChatResponse {
        success: true,
        response: reply,
        session_id,
    }))
}

#[derive(serde::Deserialize)]
struct SpeechRequest {
    text: String,
}

async fn generate_speech(
    State(state): State<AppState>,
    Json(req): Json<SpeechRequest>,
) -> Result<Response, ApiError> {
    let audio = state.speech.speak(&req.text).await.map_err(ApiError)?;
    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Backend is running!".to_string(),
    })
}

#[derive(serde::Serialize)]
struct OkResponse {
    success: bool,
}

async fn clear_memory(State(state): State<AppState>) -> Json<OkResponse> {
    state.store.clear_all();
    Json(OkResponse { success: true })
}
