//! Personaliz Backend Library
//!
//! HTTP surface around the Groq relay: settings, blocking and streamed
//! chat, speech-to-text and agent drafting.

pub mod config;
pub mod http;
pub mod state;

pub use config::Config;
pub use state::{AppState, Settings};
