//! Outbound event framing for streamed chat.
//!
//! Every fragment becomes one `data:` event. A failure becomes a single
//! `[ERROR] <message>` event, and the stream always closes with `[DONE]`.

use std::convert::Infallible;

use async_stream::stream;
use axum::response::sse::Event;
use futures_util::stream::{Stream, StreamExt};
use tracing::{error, info};

use personaliz_groq::{FragmentStream, GroqError};

/// Termination sentinel sent to consumers.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Prefix of the error event payload.
pub const ERROR_PREFIX: &str = "[ERROR]";

/// One unit of the outbound event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    Fragment(String),
    Error(String),
    Done,
}

impl OutboundFrame {
    /// Payload of the `data:` field.
    pub fn data(&self) -> String {
        match self {
            OutboundFrame::Fragment(text) => text.clone(),
            OutboundFrame::Error(message) => format!("{} {}", ERROR_PREFIX, message),
            OutboundFrame::Done => DONE_SENTINEL.to_string(),
        }
    }

    /// Render as an SSE event. Line breaks inside the payload are spread
    /// over several `data:` lines.
    pub fn into_event(self) -> Event {
        let data = self.data().replace("\r\n", "\n").replace('\r', "\n");
        Event::default().data(data)
    }
}

/// Re-frame a relay stream for the consumer.
///
/// Fragments pass through in order. The first error, whether from opening
/// the relay or mid-stream, produces one error frame and stops reading.
/// `Done` is always the last frame. Dropping the returned stream drops the
/// relay and with it the upstream connection.
pub fn outbound_frames(
    fragments: Result<FragmentStream, GroqError>,
) -> impl Stream<Item = OutboundFrame> + Send {
    stream! {
        match fragments {
            Ok(mut fragments) => {
                let mut count = 0usize;
                let mut failed = false;
                while let Some(item) = fragments.next().await {
                    match item {
                        Ok(text) => {
                            count += 1;
                            yield OutboundFrame::Fragment(text);
                        }
                        Err(err) => {
                            error!(error = %err, fragments = count, "Stream failed");
                            failed = true;
                            yield OutboundFrame::Error(err.to_string());
                            break;
                        }
                    }
                }
                if !failed {
                    info!(fragments = count, "Stream completed");
                }
            }
            Err(err) => {
                error!(error = %err, "Stream failed before opening");
                yield OutboundFrame::Error(err.to_string());
            }
        }
        yield OutboundFrame::Done;
    }
}

/// [`outbound_frames`] as SSE events.
pub fn sse_events(
    fragments: Result<FragmentStream, GroqError>,
) -> impl Stream<Item = Result<Event, Infallible>> + Send {
    outbound_frames(fragments).map(|frame| Ok(frame.into_event()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use futures_util::stream;

    fn relay(items: Vec<Result<String, GroqError>>) -> Result<FragmentStream, GroqError> {
        Ok(Box::pin(stream::iter(items)))
    }

    async fn frames(fragments: Result<FragmentStream, GroqError>) -> Vec<OutboundFrame> {
        outbound_frames(fragments).collect().await
    }

    #[tokio::test]
    async fn test_fragments_then_done() {
        let out = frames(relay(vec![Ok("Hel".to_string()), Ok("lo".to_string())])).await;
        assert_eq!(
            out,
            vec![
                OutboundFrame::Fragment("Hel".to_string()),
                OutboundFrame::Fragment("lo".to_string()),
                OutboundFrame::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_error_mid_stream_keeps_earlier_fragments() {
        let out = frames(relay(vec![
            Ok("partial".to_string()),
            Err(GroqError::Upstream {
                status: 500,
                message: "boom".to_string(),
            }),
            Ok("unreachable".to_string()),
        ]))
        .await;
        assert_eq!(
            out,
            vec![
                OutboundFrame::Fragment("partial".to_string()),
                OutboundFrame::Error("boom".to_string()),
                OutboundFrame::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_open_failure_is_error_then_done() {
        let out = frames(Err(GroqError::MissingApiKey)).await;
        assert_eq!(out.len(), 2);
        assert!(out[0].data().starts_with("[ERROR] Groq API key missing"));
        assert_eq!(out[1], OutboundFrame::Done);
    }

    #[tokio::test]
    async fn test_empty_relay_is_just_done() {
        let out = frames(relay(Vec::new())).await;
        assert_eq!(out, vec![OutboundFrame::Done]);
    }

    #[test]
    fn test_frame_data() {
        assert_eq!(OutboundFrame::Done.data(), "[DONE]");
        assert_eq!(OutboundFrame::Error("x".to_string()).data(), "[ERROR] x");
        assert_eq!(OutboundFrame::Fragment(" hi".to_string()).data(), " hi");
    }
}
