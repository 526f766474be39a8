//! HTTP server for the backend.
//!
//! Provides endpoints for:
//! - Health and model catalog (`/api/health`, `/api/models/catalog`)
//! - Settings (`/api/settings`, `/api/settings/groq-key`)
//! - Chat, blocking and streamed (`/api/chat`, `/api/chat/stream`)
//! - Speech-to-text (`/api/stt`)
//! - Agent templates and drafts (`/api/agents/...`)

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod error;
mod handlers;
pub mod responses;
pub mod sse;

pub use error::ApiError;

/// Largest audio upload accepted by `/api/stt`.
const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer for the desktop client
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/models/catalog", get(handlers::models_catalog))
        .route("/settings", get(handlers::get_settings))
        .route("/settings/groq-key", post(handlers::save_groq_settings))
        .route("/chat", post(handlers::chat))
        .route("/chat/stream", post(handlers::chat_stream))
        .route(
            "/stt",
            post(handlers::speech_to_text).layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES)),
        )
        .route("/agents/templates", get(handlers::agent_templates))
        .route("/agents/draft-from-template", post(handlers::draft_from_template))
        .route("/agents/draft-from-chat", post(handlers::draft_from_chat));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
