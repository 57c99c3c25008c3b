//! Streaming chat turns.
//!
//! [`MirrorClient::open_delta_stream`] sends the request and hands back a
//! [`DeltaStream`] of text fragments. [`MirrorClient::stream_chat`] drives
//! that stream into a [`ChatSink`] with the callback contract the chat
//! surface relies on: deltas in arrival order, then exactly one of
//! `on_done` or `on_error`.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::{Stream, StreamExt};
use mirror_prompt::{PersonaId, build_system_prompt};
use mirror_types::{ChatError, ControlFlags, Message};

use crate::client::MirrorClient;
use crate::decoder::FrameDecoder;
use crate::error::map_stream_status;
use crate::mode::ProviderMode;

/// Receiver of one streaming turn.
pub trait ChatSink {
    /// One non-empty text fragment, in arrival order.
    fn on_delta(&mut self, text: &str);
    /// The stream ended normally. Never called after [`ChatSink::on_error`].
    fn on_done(&mut self);
    /// The turn failed. Called at most once; nothing follows it.
    fn on_error(&mut self, error: ChatError);
}

impl<T: ChatSink + ?Sized> ChatSink for &mut T {
    fn on_delta(&mut self, text: &str) {
        (**self).on_delta(text);
    }

    fn on_done(&mut self) {
        (**self).on_done();
    }

    fn on_error(&mut self, error: ChatError) {
        (**self).on_error(error);
    }
}

/// A [`ChatSink`] built from three closures.
pub struct CallbackSink<D, C, E> {
    on_delta: D,
    on_done: C,
    on_error: E,
}

impl<D, C, E> CallbackSink<D, C, E>
where
    D: FnMut(&str),
    C: FnMut(),
    E: FnMut(ChatError),
{
    /// Wrap the delta, done and error callbacks.
    pub fn new(on_delta: D, on_done: C, on_error: E) -> Self {
        Self {
            on_delta,
            on_done,
            on_error,
        }
    }
}

impl<D, C, E> ChatSink for CallbackSink<D, C, E>
where
    D: FnMut(&str),
    C: FnMut(),
    E: FnMut(ChatError),
{
    fn on_delta(&mut self, text: &str) {
        (self.on_delta)(text);
    }

    fn on_done(&mut self) {
        (self.on_done)();
    }

    fn on_error(&mut self, error: ChatError) {
        (self.on_error)(error);
    }
}

/// Stream of text fragments from one response body.
///
/// Ends after the `[DONE]` sentinel or when the body ends. A transport error
/// mid-body is yielded once as [`ChatError::Unknown`], then the stream ends.
pub struct DeltaStream {
    inner: Pin<Box<dyn Stream<Item = Result<String, ChatError>> + Send>>,
}

impl DeltaStream {
    /// Decode a raw SSE byte stream in the given dialect.
    pub fn from_byte_stream<S, E>(mode: ProviderMode, bytes: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        let deltas = async_stream::stream! {
            let mut decoder = FrameDecoder::new();
            let mut bytes = std::pin::pin!(bytes);

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(ChatError::Unknown(format!("stream read error: {e}")));
                        return;
                    }
                };

                for payload in decoder.push_bytes(&chunk) {
                    if let Some(text) = mode.extract_delta(&payload) {
                        yield Ok(text.to_owned());
                    }
                }

                if decoder.is_finished() {
                    break;
                }
            }

            if !decoder.buffered().trim().is_empty() {
                tracing::debug!(
                    leftover = decoder.buffered().len(),
                    "discarding unterminated stream tail"
                );
            }
        };
        Self {
            inner: Box::pin(deltas),
        }
    }
}

impl Stream for DeltaStream {
    type Item = Result<String, ChatError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for DeltaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeltaStream").finish_non_exhaustive()
    }
}

impl MirrorClient {
    /// Send a streaming turn and return its fragments.
    ///
    /// The system prompt is rebuilt from `persona`, `messages` and `flags`.
    /// A missing credential fails before any network traffic.
    pub async fn open_delta_stream(
        &self,
        persona: PersonaId,
        messages: &[Message],
        flags: ControlFlags,
    ) -> Result<DeltaStream, ChatError> {
        let api_key = self.credential()?;
        let mode = ProviderMode::for_credential(api_key);
        let system = build_system_prompt(persona, messages, flags);

        let response = self.send(api_key, mode, &system, messages, true).await?;
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatError::RateLimited);
        }
        if !status.is_success() {
            // A body that cannot be read still leaves the status to report.
            let body = response.text().await.unwrap_or_default();
            return Err(map_stream_status(status, &body));
        }

        Ok(DeltaStream::from_byte_stream(mode, response.bytes_stream()))
    }

    /// Run one streaming turn into `sink`.
    ///
    /// Emits every fragment through [`ChatSink::on_delta`], then exactly one
    /// of [`ChatSink::on_done`] or [`ChatSink::on_error`].
    pub async fn stream_chat<S: ChatSink>(
        &self,
        persona: PersonaId,
        messages: &[Message],
        flags: ControlFlags,
        mut sink: S,
    ) {
        match self.open_delta_stream(persona, messages, flags).await {
            Ok(deltas) => drive_sink(persona, deltas, sink).await,
            Err(error) => {
                tracing::warn!(persona = %persona, error = %error, "chat turn failed to start");
                sink.on_error(error);
            }
        }
    }
}

/// Feed every fragment of `deltas` into `sink`, then one terminal callback.
pub(crate) async fn drive_sink<S: ChatSink>(persona: PersonaId, mut deltas: DeltaStream, mut sink: S) {
    let mut fragments = 0usize;
    while let Some(item) = deltas.next().await {
        match item {
            Ok(text) => {
                fragments += 1;
                sink.on_delta(&text);
            }
            Err(error) => {
                tracing::warn!(persona = %persona, fragments, error = %error, "chat stream interrupted");
                sink.on_error(error);
                return;
            }
        }
    }

    tracing::debug!(persona = %persona, fragments, "chat turn complete");
    sink.on_done();
}
