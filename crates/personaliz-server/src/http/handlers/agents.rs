//! Agent template and drafting handlers.
//!
//! Drafts are returned to the caller; storing them is the agent store's job.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, response::IntoResponse, Json};
use serde_json::json;
use tracing::info;

use personaliz_core::{draft_from_prompt, AgentTemplate, AGENT_TEMPLATES};

use crate::http::responses::{AgentDraftResponse, DraftFromChatRequest, DraftFromTemplateRequest};
use crate::http::ApiError;
use crate::state::AppState;

/// GET /api/agents/templates
pub async fn agent_templates() -> impl IntoResponse {
    Json(json!({ "items": AGENT_TEMPLATES }))
}

/// POST /api/agents/draft-from-template
pub async fn draft_from_template(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DraftFromTemplateRequest>, JsonRejection>,
) -> Result<Json<AgentDraftResponse>, ApiError> {
    let Json(req) = body?;
    let key = req.key.trim();
    let template = AgentTemplate::find(key).ok_or(ApiError::TemplateNotFound)?;

    let sandbox = state.settings.read().await.sandbox_default;
    info!(template = %key, sandbox, "Agent drafted from template");

    Ok(Json(AgentDraftResponse {
        ok: true,
        item: template.to_draft(sandbox),
    }))
}

/// POST /api/agents/draft-from-chat
pub async fn draft_from_chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DraftFromChatRequest>, JsonRejection>,
) -> Result<Json<AgentDraftResponse>, ApiError> {
    let Json(req) = body?;
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(ApiError::MissingField("prompt"));
    }

    let mut draft = draft_from_prompt(prompt);
    draft.sandbox = state.settings.read().await.sandbox_default;
    info!(
        action_type = %draft.action_type,
        schedule = %draft.schedule_cron,
        "Agent drafted from chat"
    );

    Ok(Json(AgentDraftResponse {
        ok: true,
        item: draft,
    }))
}
