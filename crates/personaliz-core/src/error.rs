//! Core domain errors.

use thiserror::Error;

/// Core domain errors for Personaliz.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Conversation has no messages to send.
    #[error("Conversation is empty")]
    EmptyConversation,

    /// Last message of a conversation is not a user turn.
    #[error("Last message must be a user turn, got {0}")]
    NotUserTurn(String),
}
