//! Wire types for the chat completions and transcription endpoints.

use personaliz_core::{ChatMessage, SamplingParams};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
    /// Optional upstream; omitted from the body when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<String>,
}

impl CompletionRequest {
    /// Build a request from a conversation and its sampling parameters.
    pub fn new(
        model: impl Into<String>,
        messages: Vec<ChatMessage>,
        params: SamplingParams,
        stream: bool,
    ) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            stream,
            reasoning_effort: params.reasoning_effort,
        }
    }

    /// Same request with the reasoning-effort field dropped.
    pub fn without_reasoning_effort(mut self) -> Self {
        self.reasoning_effort = None;
        self
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Non-streaming completion body.
#[derive(Debug, Deserialize)]
pub(crate) struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionChoice {
    #[serde(default)]
    pub message: Option<ContentHolder>,
}

/// Payload of one streamed `data:` frame.
#[derive(Debug, Deserialize)]
pub(crate) struct StreamPayload {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamChoice {
    #[serde(default)]
    pub delta: Option<ContentHolder>,
}

/// `message` or `delta` object; both carry an optional `content`.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentHolder {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranscriptionResponse {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Extract upstream's `error.message`, falling back to the raw body.
pub(crate) fn upstream_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_else(|| body.trim().to_string())
}
