//! Error types for the Groq client.

use personaliz_core::CoreError;
use thiserror::Error;

/// Errors that can occur when calling the Groq API.
#[derive(Debug, Error)]
pub enum GroqError {
    /// No API key configured; nothing was sent upstream.
    #[error("Groq API key missing. Please save it in Settings.")]
    MissingApiKey,

    /// Request rejected before it was sent.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// Upstream answered with a 4xx/5xx status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Connection, timeout or body read failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream body did not have the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GroqError {
    /// Whether upstream rejected the request because of `field`.
    pub fn rejects_field(&self, field: &str) -> bool {
        matches!(self, GroqError::Upstream { message, .. } if message.contains(field))
    }

    /// HTTP status reported by upstream, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GroqError::Upstream { status, .. } => Some(*status),
            GroqError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_field_only_matches_upstream_message() {
        let err = GroqError::Upstream {
            status: 400,
            message: "`reasoning_effort` is not supported with this model".to_string(),
        };
        assert!(err.rejects_field("reasoning_effort"));
        assert!(!err.rejects_field("top_p"));
        assert!(!GroqError::MissingApiKey.rejects_field("reasoning_effort"));
    }
}
