//! HTTP request handlers.

mod agents;
mod chat;
mod health;
mod settings;
mod stt;

pub use agents::{agent_templates, draft_from_chat, draft_from_template};
pub use chat::{chat, chat_stream};
pub use health::{health_check, models_catalog};
pub use settings::{get_settings, save_groq_settings};
pub use stt::speech_to_text;
