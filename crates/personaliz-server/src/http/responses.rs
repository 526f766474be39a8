//! HTTP request and response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use personaliz_core::{AgentDraft, ChatMessage, ChatRole, MODEL_CATALOG};

use crate::state::Settings;

// ============================================================================
// Chat types
// ============================================================================

/// Body of `/api/chat` and `/api/chat/stream`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    /// New user message.
    #[serde(default)]
    pub message: String,

    /// Earlier turns, oldest first.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// One client-supplied history turn.
#[derive(Debug, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl ChatRequest {
    /// History plus the new message as an upstream conversation.
    ///
    /// Turns with empty content are dropped; unknown roles become user turns.
    pub fn conversation(&self, message: &str) -> Vec<ChatMessage> {
        self.history
            .iter()
            .filter(|entry| !entry.content.is_empty())
            .map(|entry| {
                let role = entry
                    .role
                    .as_deref()
                    .map(ChatRole::from_client)
                    .unwrap_or(ChatRole::User);
                ChatMessage::new(role, entry.content.clone())
            })
            .chain(std::iter::once(ChatMessage::user(message)))
            .collect()
    }
}

/// Blocking chat reply.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub ok: bool,
    pub reply: String,
}

// ============================================================================
// Settings types
// ============================================================================

/// Body of `/api/settings/groq-key`.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default, alias = "api_key", alias = "groqKey", alias = "groq_key")]
    pub groq_api_key: Option<String>,

    #[serde(default, alias = "model")]
    pub groq_model: Option<String>,

    #[serde(default)]
    pub sandbox_default: Option<bool>,
}

/// Settings as exposed to clients; the key itself never leaves the server.
#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub groq_model: String,
    pub sandbox_default: bool,
    pub has_key: bool,
}

impl From<&Settings> for SettingsView {
    fn from(settings: &Settings) -> Self {
        Self {
            groq_model: settings.groq_model.clone(),
            sandbox_default: settings.sandbox_default,
            has_key: settings.has_key(),
        }
    }
}

/// Response of a settings save.
#[derive(Debug, Serialize)]
pub struct SettingsSaved {
    pub ok: bool,
    pub settings: SettingsView,
}

// ============================================================================
// Speech-to-text types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct Transcription {
    pub ok: bool,
    pub text: String,
}

// ============================================================================
// Agent types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct DraftFromTemplateRequest {
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DraftFromChatRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct AgentDraftResponse {
    pub ok: bool,
    pub item: AgentDraft,
}

/// Model catalog as a JSON object of group name to model list, in catalog order.
pub fn catalog_json() -> Map<String, Value> {
    MODEL_CATALOG
        .iter()
        .map(|(group, models)| (group.to_string(), Value::from(models.to_vec())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_drops_empty_turns() {
        let request: ChatRequest = serde_json::from_value(serde_json::json!({
            "message": "ignored here",
            "history": [
                { "role": "user", "content": "hi" },
                { "role": "assistant", "content": "" },
                { "role": "assistant", "content": "hello" },
                { "content": "no role" },
                { "role": "tool", "content": "odd role" }
            ]
        }))
        .unwrap();

        let conversation = request.conversation("next");
        let roles: Vec<ChatRole> = conversation.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::User,
                ChatRole::User,
                ChatRole::User
            ]
        );
        assert_eq!(conversation.last().unwrap().content, "next");
    }

    #[test]
    fn test_settings_update_aliases() {
        let update: SettingsUpdate =
            serde_json::from_str(r#"{"groqKey":"k","model":"llama-3.1-8b-instant"}"#).unwrap();
        assert_eq!(update.groq_api_key.as_deref(), Some("k"));
        assert_eq!(update.groq_model.as_deref(), Some("llama-3.1-8b-instant"));
        assert_eq!(update.sandbox_default, None);
    }

    #[test]
    fn test_catalog_json() {
        let catalog = catalog_json();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog["reasoning"][0], "deepseek-r1-distill-llama-70b");

        let groups: Vec<&str> = catalog.keys().map(String::as_str).collect();
        assert_eq!(groups, vec!["recommended", "reasoning", "vision"]);
    }
}
