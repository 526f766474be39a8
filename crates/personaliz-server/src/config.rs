//! Backend configuration.

use std::time::Duration;

use personaliz_core::DEFAULT_MODEL;
use personaliz_groq::GROQ_API_BASE;

/// Backend configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address.
    pub http_bind_addr: String,

    /// Base URL of the OpenAI-compatible Groq API.
    pub groq_api_base: String,

    /// API key from the environment, used when none is saved in settings.
    pub groq_api_key: String,

    /// Model selected until one is saved in settings.
    pub default_model: String,

    /// Ceiling for blocking completions and transcriptions (seconds).
    pub complete_timeout_secs: u64,

    /// Ceiling for a streamed completion (seconds).
    pub stream_timeout_secs: u64,
}

impl Config {
    pub fn complete_timeout(&self) -> Duration {
        Duration::from_secs(self.complete_timeout_secs)
    }

    pub fn stream_timeout(&self) -> Duration {
        Duration::from_secs(self.stream_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_bind_addr: "127.0.0.1:8000".to_string(),
            groq_api_base: GROQ_API_BASE.to_string(),
            groq_api_key: String::new(),
            default_model: DEFAULT_MODEL.to_string(),
            complete_timeout_secs: 60,
            stream_timeout_secs: 120,
        }
    }
}
