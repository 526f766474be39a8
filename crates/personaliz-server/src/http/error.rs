//! API error type.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::warn;

use personaliz_groq::GroqError;

use super::responses::catalog_json;

/// API errors, rendered as `{ "ok": false, "error": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No API key saved or configured.
    #[error("Groq API key missing. Please save it in Settings.")]
    MissingApiKey,

    /// Body is not the expected JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    /// Required field absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Model outside the catalog.
    #[error("Invalid model '{0}'")]
    InvalidModel(String),

    /// Unknown agent template key.
    #[error("Template not found")]
    TemplateNotFound,

    /// Multipart upload could not be read.
    #[error("{0}")]
    BadUpload(String),

    /// Upstream call failed; `action` names what failed ("Chat", "STT").
    #[error("{action} failed: {source}")]
    Upstream {
        action: &'static str,
        #[source]
        source: GroqError,
    },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::TemplateNotFound => StatusCode::NOT_FOUND,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection, "Invalid JSON in request body");
        ApiError::InvalidJson(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "ok": false, "error": self.to_string() });
        if let ApiError::InvalidModel(_) = self {
            body["allowed"] = Value::Object(catalog_json());
        }
        (self.status(), Json(body)).into_response()
    }
}
