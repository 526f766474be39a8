//! Groq API client.
//!
//! Both completion modes share one fallback: when upstream rejects the
//! request because of `reasoning_effort`, it is sent once more without that
//! field. Any other failure, and any failure of that second attempt, is
//! returned as is.

use std::pin::Pin;
use std::time::Duration;

use async_stream::try_stream;
use futures_util::stream::{Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

use personaliz_core::chat::ensure_user_turn;
use personaliz_core::{ChatMessage, SamplingParams};

use crate::error::GroqError;
use crate::frame::{parse_frame, Frame, LineBuffer};
use crate::types::{
    upstream_error_message, CompletionRequest, CompletionResponse, TranscriptionResponse,
};

/// Public Groq endpoint (OpenAI-compatible).
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Optional request field some models reject.
pub const REASONING_EFFORT_FIELD: &str = "reasoning_effort";

/// Speech-to-text model used for transcriptions.
pub const TRANSCRIPTION_MODEL: &str = "whisper-large-v3-turbo";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_COMPLETE_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_secs(120);

/// Lazy sequence of text fragments produced by [`GroqClient::stream`].
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, GroqError>> + Send>>;

/// Client for the Groq chat completions and transcription endpoints.
///
/// Cheap to clone; clones share the connection pool. Holds no credentials:
/// the API key is passed on every call.
#[derive(Debug, Clone)]
pub struct GroqClient {
    http: Client,
    base_url: String,
    complete_timeout: Duration,
    stream_timeout: Duration,
}

impl GroqClient {
    /// Create a client for the public Groq endpoint.
    pub fn new() -> Result<Self, GroqError> {
        Self::with_base_url(GROQ_API_BASE)
    }

    /// Create a client for another OpenAI-compatible base URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, GroqError> {
        let http = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            complete_timeout: DEFAULT_COMPLETE_TIMEOUT,
            stream_timeout: DEFAULT_STREAM_TIMEOUT,
        })
    }

    /// Builder method to set the request ceilings.
    ///
    /// `complete` bounds blocking completions and transcriptions, `stream`
    /// bounds a streamed completion from connect to the last frame.
    pub fn with_timeouts(mut self, complete: Duration, stream: Duration) -> Self {
        self.complete_timeout = complete;
        self.stream_timeout = stream;
        self
    }

    /// Run a blocking chat completion and return the full reply, trimmed.
    pub async fn complete(
        &self,
        api_key: &str,
        model: &str,
        messages: Vec<ChatMessage>,
        params: SamplingParams,
    ) -> Result<String, GroqError> {
        let api_key = require_key(api_key)?;
        ensure_user_turn(&messages)?;

        let request = CompletionRequest::new(model, messages, params, false);
        let response = self
            .send_with_fallback(api_key, request, self.complete_timeout)
            .await?;

        let body: CompletionResponse = serde_json::from_slice(&response.bytes().await?)?;
        let reply = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();

        info!(model = %model, chars = reply.len(), "Chat completion finished");
        Ok(reply.trim().to_string())
    }

    /// Open a streamed chat completion.
    ///
    /// Configuration problems are returned here, before anything is sent.
    /// Everything else (connection, upstream rejection, body read) surfaces
    /// as the single error item of the returned stream, after which the
    /// stream ends. The stream owns the upstream response; dropping it closes
    /// the connection.
    pub fn stream(
        &self,
        api_key: &str,
        model: &str,
        messages: Vec<ChatMessage>,
        params: SamplingParams,
    ) -> Result<FragmentStream, GroqError> {
        let api_key = require_key(api_key)?.to_string();
        ensure_user_turn(&messages)?;

        let client = self.clone();
        let request = CompletionRequest::new(model, messages, params, true);
        let model = model.to_string();

        Ok(Box::pin(try_stream! {
            let response = client
                .send_with_fallback(&api_key, request, client.stream_timeout)
                .await?;
            debug!(model = %model, "Upstream stream opened");

            let mut body = response.bytes_stream();
            let mut lines = LineBuffer::default();
            let mut done = false;
            let mut fragments = 0usize;

            while let Some(chunk) = body.next().await {
                lines.extend(&chunk?);
                while let Some(line) = lines.next_line() {
                    match parse_frame(&line) {
                        Frame::Delta(text) => {
                            fragments += 1;
                            yield text;
                        }
                        Frame::Done => {
                            done = true;
                            break;
                        }
                        Frame::Skip => {}
                    }
                }
                if done {
                    break;
                }
            }

            if !done {
                if let Some(Frame::Delta(text)) = lines.finish().as_deref().map(parse_frame) {
                    fragments += 1;
                    yield text;
                }
            }

            debug!(model = %model, fragments, done, "Upstream stream finished");
        }))
    }

    /// Transcribe an audio clip and return the recognised text, trimmed.
    pub async fn transcribe(
        &self,
        api_key: &str,
        audio: Vec<u8>,
        filename: &str,
        language: Option<&str>,
    ) -> Result<String, GroqError> {
        let api_key = require_key(api_key)?;

        let file = Part::bytes(audio)
            .file_name(filename.to_string())
            .mime_str("audio/webm")?;
        let mut form = Form::new()
            .part("file", file)
            .text("model", TRANSCRIPTION_MODEL);
        if let Some(language) = language {
            form = form.text("language", language.to_string());
        }

        let url = format!("{}/audio/transcriptions", self.base_url);
        debug!(url = %url, filename = %filename, "POST transcription");

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .timeout(self.complete_timeout)
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response).await?;

        let body: TranscriptionResponse = serde_json::from_slice(&response.bytes().await?)?;
        Ok(body.text.unwrap_or_default().trim().to_string())
    }

    /// Send a completion request, retrying once without `reasoning_effort`
    /// when upstream rejects that field.
    async fn send_with_fallback(
        &self,
        api_key: &str,
        request: CompletionRequest,
        timeout: Duration,
    ) -> Result<Response, GroqError> {
        match self.send(api_key, &request, timeout).await {
            Ok(response) => Ok(response),
            Err(err)
                if request.reasoning_effort.is_some()
                    && err.rejects_field(REASONING_EFFORT_FIELD) =>
            {
                warn!(
                    model = %request.model,
                    error = %err,
                    "Model rejected reasoning_effort, retrying without it"
                );
                let request = request.without_reasoning_effort();
                self.send(api_key, &request, timeout).await
            }
            Err(err) => Err(err),
        }
    }

    async fn send(
        &self,
        api_key: &str,
        request: &CompletionRequest,
        timeout: Duration,
    ) -> Result<Response, GroqError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(
            url = %url,
            model = %request.model,
            stream = request.stream,
            reasoning_effort = request.reasoning_effort.is_some(),
            "POST chat completion"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .timeout(timeout)
            .json(request)
            .send()
            .await?;
        check_status(response).await
    }
}

fn require_key(api_key: &str) -> Result<&str, GroqError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(GroqError::MissingApiKey);
    }
    Ok(api_key)
}

/// Turn a 4xx/5xx response into [`GroqError::Upstream`].
async fn check_status(response: Response) -> Result<Response, GroqError> {
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            warn!(status = status.as_u16(), error = %err, "Failed to read upstream error body");
            String::new()
        }
    };
    Err(GroqError::Upstream {
        status: status.as_u16(),
        message: upstream_error_message(&body),
    })
}
