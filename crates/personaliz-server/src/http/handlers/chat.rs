//! Chat handlers: blocking reply and streamed relay.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName},
    response::{sse::Sse, IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use personaliz_core::{ChatMessage, SamplingParams};

use crate::http::responses::{ChatReply, ChatRequest};
use crate::http::sse::sse_events;
use crate::http::ApiError;
use crate::state::AppState;

const X_ACCEL_BUFFERING: HeaderName = HeaderName::from_static("x-accel-buffering");

/// Validated chat call: key, model and conversation.
struct ChatCall {
    api_key: String,
    model: String,
    messages: Vec<ChatMessage>,
}

/// Resolve the key before looking at the body, so a missing key is reported
/// even for malformed requests and nothing is sent upstream.
async fn prepare(
    state: &AppState,
    route: &'static str,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<ChatCall, ApiError> {
    let api_key = state.resolve_api_key().await;
    if api_key.is_empty() {
        warn!(route, "Chat attempted without API key");
        return Err(ApiError::MissingApiKey);
    }

    let Json(req) = body?;
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::MissingField("message"));
    }

    let model = state.settings.read().await.groq_model.clone();
    Ok(ChatCall {
        api_key,
        model,
        messages: req.conversation(message),
    })
}

/// POST /api/chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let call = prepare(&state, "chat", body).await?;

    let reply = state
        .groq
        .complete(
            &call.api_key,
            &call.model,
            call.messages,
            SamplingParams::default(),
        )
        .await
        .map_err(|source| {
            warn!(error = %source, "Chat completion failed");
            ApiError::Upstream {
                action: "Chat",
                source,
            }
        })?;

    info!(model = %call.model, "Chat completion success");
    Ok(Json(ChatReply { ok: true, reply }))
}

/// POST /api/chat/stream
///
/// Validation failures are plain JSON errors. Once the event stream starts,
/// failures travel in-band as an `[ERROR]` event followed by `[DONE]`.
pub async fn chat_stream(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let call = match prepare(&state, "chat_stream", body).await {
        Ok(call) => call,
        Err(err) => return err.into_response(),
    };

    info!(
        model = %call.model,
        turns = call.messages.len(),
        "Starting chat stream"
    );

    let fragments = state.groq.stream(
        &call.api_key,
        &call.model,
        call.messages,
        SamplingParams::default(),
    );

    (
        [
            (header::CACHE_CONTROL, "no-cache"),
            (X_ACCEL_BUFFERING, "no"),
        ],
        Sse::new(sse_events(fragments)),
    )
        .into_response()
}
