//! Shared application state.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use personaliz_core::{validate_model, DEFAULT_MODEL};
use personaliz_groq::GroqClient;

use crate::config::Config;

/// User-editable settings, kept in memory for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Saved Groq API key; empty when none was saved.
    pub groq_api_key: String,

    /// Model used for chat.
    pub groq_model: String,

    /// Whether new agents start in sandbox mode.
    pub sandbox_default: bool,
}

impl Settings {
    /// Whether a non-blank key has been saved.
    pub fn has_key(&self) -> bool {
        !self.groq_api_key.trim().is_empty()
    }
}

/// Shared application state.
pub struct AppState {
    /// Current settings.
    pub settings: RwLock<Settings>,

    /// Key from the environment, the fallback when settings hold none.
    env_api_key: String,

    /// Upstream client shared by all requests.
    pub groq: GroqClient,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    ///
    /// Settings start from the configured key and model; a model outside the
    /// catalog is replaced by the default one.
    pub fn new(config: &Config, groq: GroqClient) -> Arc<Self> {
        let groq_model = if validate_model(&config.default_model) {
            config.default_model.clone()
        } else {
            warn!(
                model = %config.default_model,
                fallback = DEFAULT_MODEL,
                "Configured model is not in the catalog"
            );
            DEFAULT_MODEL.to_string()
        };

        Arc::new(Self {
            settings: RwLock::new(Settings {
                groq_api_key: config.groq_api_key.trim().to_string(),
                groq_model,
                sandbox_default: true,
            }),
            env_api_key: config.groq_api_key.trim().to_string(),
            groq,
        })
    }

    /// Snapshot of the current settings.
    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// API key to use for the next upstream call: saved key first, then the
    /// environment key. Empty when neither is set.
    pub async fn resolve_api_key(&self) -> String {
        let saved = self.settings.read().await.groq_api_key.trim().to_string();
        if saved.is_empty() {
            self.env_api_key.clone()
        } else {
            saved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(config: Config) -> Arc<AppState> {
        AppState::new(&config, GroqClient::new().unwrap())
    }

    #[tokio::test]
    async fn test_resolve_api_key_prefers_saved_key() {
        let state = state_with(Config {
            groq_api_key: " env-key ".to_string(),
            ..Config::default()
        });
        assert_eq!(state.resolve_api_key().await, "env-key");

        state.settings.write().await.groq_api_key = "saved-key".to_string();
        assert_eq!(state.resolve_api_key().await, "saved-key");

        state.settings.write().await.groq_api_key = "   ".to_string();
        assert_eq!(state.resolve_api_key().await, "env-key");
    }

    #[tokio::test]
    async fn test_unknown_configured_model_falls_back() {
        let state = state_with(Config {
            default_model: "gpt-4o".to_string(),
            ..Config::default()
        });
        let settings = state.settings().await;
        assert_eq!(settings.groq_model, DEFAULT_MODEL);
        assert!(settings.sandbox_default);
        assert!(!settings.has_key());
    }
}
