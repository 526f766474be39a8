//! Speech-to-text handler.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::{info, warn};

use crate::http::responses::Transcription;
use crate::http::ApiError;
use crate::state::AppState;

const DEFAULT_FILENAME: &str = "audio.webm";

/// POST /api/stt
///
/// Multipart form with the clip in `audio` and an optional `language` hint.
pub async fn speech_to_text(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Transcription>, ApiError> {
    let api_key = state.resolve_api_key().await;
    if api_key.is_empty() {
        warn!("STT attempted without API key");
        return Err(ApiError::MissingApiKey);
    }

    let mut multipart = multipart.map_err(|e| ApiError::BadUpload(e.body_text()))?;

    let mut audio: Option<(String, Vec<u8>)> = None;
    let mut language: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadUpload(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => {
                let filename = field
                    .file_name()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(DEFAULT_FILENAME)
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadUpload(e.body_text()))?;
                audio = Some((filename, bytes.to_vec()));
            }
            "language" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadUpload(e.body_text()))?;
                let text = text.trim();
                if !text.is_empty() {
                    language = Some(text.to_string());
                }
            }
            _ => {}
        }
    }

    let Some((filename, bytes)) = audio else {
        return Err(ApiError::BadUpload(
            "Missing multipart file field: audio".to_string(),
        ));
    };

    let size = bytes.len();
    let text = state
        .groq
        .transcribe(&api_key, bytes, &filename, language.as_deref())
        .await
        .map_err(|source| {
            warn!(error = %source, "STT failed");
            ApiError::Upstream {
                action: "STT",
                source,
            }
        })?;

    info!(filename = %filename, bytes = size, "STT success");
    Ok(Json(Transcription { ok: true, text }))
}
