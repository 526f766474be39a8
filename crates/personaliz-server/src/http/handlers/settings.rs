//! Settings handlers.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use personaliz_core::validate_model;

use crate::http::responses::{SettingsSaved, SettingsUpdate, SettingsView};
use crate::http::ApiError;
use crate::state::AppState;

/// GET /api/settings
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<SettingsView> {
    let settings = state.settings().await;
    Json(SettingsView::from(&settings))
}

/// POST /api/settings/groq-key
///
/// A blank key leaves the saved key untouched; an unknown model rejects the
/// whole update.
pub async fn save_groq_settings(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SettingsUpdate>, JsonRejection>,
) -> Result<Json<SettingsSaved>, ApiError> {
    let Json(update) = body?;

    let mut settings = state.settings.write().await;

    let model = update
        .groq_model
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| settings.groq_model.clone());
    if !validate_model(&model) {
        return Err(ApiError::InvalidModel(model));
    }

    if let Some(key) = update.groq_api_key.as_deref().map(str::trim) {
        if !key.is_empty() {
            settings.groq_api_key = key.to_string();
        }
    }
    settings.groq_model = model;
    if let Some(sandbox_default) = update.sandbox_default {
        settings.sandbox_default = sandbox_default;
    }

    info!(
        model = %settings.groq_model,
        has_key = settings.has_key(),
        sandbox_default = settings.sandbox_default,
        "Groq settings updated"
    );

    Ok(Json(SettingsSaved {
        ok: true,
        settings: SettingsView::from(&*settings),
    }))
}
