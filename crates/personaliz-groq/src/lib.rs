//! Groq client for Personaliz.
//!
//! Talks to the OpenAI-compatible Groq API: blocking chat completions,
//! streamed completions relayed as a lazy sequence of text fragments, and
//! audio transcription.
//!
//! # Example
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use personaliz_core::{ChatMessage, SamplingParams};
//! use personaliz_groq::GroqClient;
//!
//! async fn relay() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GroqClient::new()?;
//!     let mut fragments = client.stream(
//!         "gsk_...",
//!         "llama-3.3-70b-versatile",
//!         vec![ChatMessage::user("hi")],
//!         SamplingParams::default(),
//!     )?;
//!
//!     while let Some(fragment) = fragments.next().await {
//!         print!("{}", fragment?);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod frame;
mod types;

pub use client::{
    FragmentStream, GroqClient, GROQ_API_BASE, REASONING_EFFORT_FIELD, TRANSCRIPTION_MODEL,
};
pub use error::GroqError;
pub use frame::{parse_frame, Frame, LineBuffer};
pub use types::CompletionRequest;
