//! Health and catalog handlers.

use axum::{response::IntoResponse, Json};
use serde_json::json;

use crate::http::responses::catalog_json;

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "ok": true,
        "service": "personaliz-backend",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Model catalog endpoint.
pub async fn models_catalog() -> impl IntoResponse {
    Json(json!({ "catalog": catalog_json() }))
}
