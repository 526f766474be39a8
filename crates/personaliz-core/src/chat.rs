//! Chat message types for conversation history.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Role of a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System message (instructions).
    System,
    /// User message (input/prompt).
    User,
    /// Assistant message (response).
    Assistant,
}

impl ChatRole {
    /// Parse a role coming from client-supplied history.
    ///
    /// Anything that is not a known role is treated as a user turn.
    pub fn from_client(role: &str) -> Self {
        match role.trim().to_ascii_lowercase().as_str() {
            "system" => ChatRole::System,
            "assistant" => ChatRole::Assistant,
            _ => ChatRole::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of this message.
    pub role: ChatRole,
    /// Message content.
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }
}

/// Check that a conversation can be sent upstream: non-empty and ending
/// with the current user turn.
pub fn ensure_user_turn(messages: &[ChatMessage]) -> Result<(), CoreError> {
    match messages.last() {
        None => Err(CoreError::EmptyConversation),
        Some(last) if last.role != ChatRole::User => {
            Err(CoreError::NotUserTurn(last.role.to_string()))
        }
        Some(_) => Ok(()),
    }
}
