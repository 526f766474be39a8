//! Personaliz Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Database
//! - Runtime specifics
//!
//! Everything the relay and the HTTP layer pass around lives here.

pub mod agent;
pub mod catalog;
pub mod chat;
pub mod error;
pub mod sampling;

// Re-export commonly used types
pub use agent::{draft_from_prompt, AgentDraft, AgentTemplate, AGENT_TEMPLATES};
pub use catalog::{all_models, validate_model, DEFAULT_MODEL, MODEL_CATALOG};
pub use chat::{ChatMessage, ChatRole};
pub use error::CoreError;
pub use sampling::SamplingParams;
