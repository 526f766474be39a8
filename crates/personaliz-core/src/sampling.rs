//! Sampling parameters sent with every completion request.

use serde::{Deserialize, Serialize};

/// Default reasoning effort requested from models that support it.
pub const DEFAULT_REASONING_EFFORT: &str = "medium";

/// Sampling parameters for a completion call.
///
/// `reasoning_effort` is optional upstream: models that reject it get the
/// request retried without the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<String>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_tokens: 2048,
            top_p: 1.0,
            reasoning_effort: Some(DEFAULT_REASONING_EFFORT.to_string()),
        }
    }
}

impl SamplingParams {
    /// Builder method to set or clear reasoning effort.
    pub fn with_reasoning_effort(mut self, effort: Option<String>) -> Self {
        self.reasoning_effort = effort;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SamplingParams::default();
        assert_eq!(params.temperature, 1.0);
        assert_eq!(params.max_tokens, 2048);
        assert_eq!(params.top_p, 1.0);
        assert_eq!(params.reasoning_effort.as_deref(), Some("medium"));
    }
}
