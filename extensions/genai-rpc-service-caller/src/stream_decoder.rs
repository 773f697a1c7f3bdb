use crate::error::RpcCallerError;
use futures::{Stream, StreamExt};
use genai_rpc::frame::DecodeAnomaly;
use genai_rpc::rpc::{RpcDecoderState, RpcStreamDecoder, RpcStreamEvent};
use genai_rpc_service::{ChunkSource, TransportResponse};
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

/// Receives every anomaly a `StreamDecoder` recovers from.
pub type AnomalyHook = Arc<dyn Fn(&DecodeAnomaly) + Send + Sync>;

/// Pull-driven decoder over an open generation stream.
///
/// Each call to `next_event` reads from the chunk source only until at least
/// one event is ready or the stream reaches a terminal state. All decoding
/// state belongs to this value; nothing is shared with other streams.
///
/// The chunk source is released exactly once: as soon as a terminal state is
/// reached, or when the decoder is dropped before that (e.g. the consumer
/// abandoned the stream).
pub struct StreamDecoder {
    source: Option<Box<dyn ChunkSource>>, // `None` once released
    decoder: RpcStreamDecoder,
    pending: VecDeque<RpcStreamEvent>,
    on_anomaly: Option<AnomalyHook>,
}

impl StreamDecoder {
    /// Validates the initial response of a stream and takes ownership of its body.
    pub fn open(mut response: TransportResponse) -> Result<Self, RpcCallerError> {
        if !response.is_success() {
            if let Some(mut body) = response.body.take() {
                body.release();
            }

            return Err(io::Error::other(format!(
                "HTTP {}: {}",
                response.status, response.status_text
            ))
            .into());
        }

        match response.body.take() {
            Some(source) => Ok(Self::new(source)),
            None => Err(io::Error::other("Response body is not readable").into()),
        }
    }

    pub fn new(source: Box<dyn ChunkSource>) -> Self {
        Self {
            source: Some(source),
            decoder: RpcStreamDecoder::new(),
            pending: VecDeque::new(),
            on_anomaly: None,
        }
    }

    pub fn with_anomaly_hook(mut self, hook: AnomalyHook) -> Self {
        self.on_anomaly = Some(hook);
        self
    }

    pub fn state(&self) -> RpcDecoderState {
        self.decoder.state()
    }

    /// Returns the next event, or `None` once the stream is over.
    ///
    /// `Done` and `ProtocolError` are always the last event. A transport
    /// failure is returned once as `Err` and ends the stream.
    pub async fn next_event(&mut self) -> Option<Result<RpcStreamEvent, RpcCallerError>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }

            let source = self.source.as_mut()?;

            match source.read_chunk().await {
                Ok(Some(chunk)) => {
                    for item in self.decoder.read_bytes(&chunk) {
                        match item {
                            Ok(event) => self.pending.push_back(event),
                            Err(anomaly) => self.report(&anomaly),
                        }
                    }

                    if self.decoder.state().is_terminal() {
                        self.release();
                    }
                }
                Ok(None) => {
                    if let Some(anomaly) = self.decoder.finish() {
                        self.report(&anomaly);
                    }
                    self.release();
                }
                Err(err) => {
                    self.decoder.fail();
                    self.release();
                    return Some(Err(RpcCallerError::Transport(err)));
                }
            }
        }
    }

    /// Adapts the decoder into a `Stream` of events.
    pub fn into_stream(self) -> impl Stream<Item = Result<RpcStreamEvent, RpcCallerError>> + Send {
        futures::stream::unfold(self, |mut decoder| async move {
            let item = decoder.next_event().await?;
            Some((item, decoder))
        })
    }

    /// Adapts the decoder into a `Stream` of text chunks.
    ///
    /// `Done` ends the stream silently; an in-band error becomes
    /// `RpcCallerError::StreamProtocol`.
    pub fn into_text_stream(self) -> impl Stream<Item = Result<String, RpcCallerError>> + Send {
        self.into_stream().filter_map(|item| async move {
            match item {
                Ok(RpcStreamEvent::Data(text)) => Some(Ok(text)),
                Ok(RpcStreamEvent::Done) => None,
                Ok(RpcStreamEvent::ProtocolError(message)) => {
                    Some(Err(RpcCallerError::StreamProtocol { message }))
                }
                Err(err) => Some(Err(err)),
            }
        })
    }

    fn report(&self, anomaly: &DecodeAnomaly) {
        match anomaly {
            DecodeAnomaly::UnrecognizedPayload { .. } => {
                tracing::debug!(%anomaly, "skipping stream frame")
            }
            _ => tracing::warn!(%anomaly, "skipping malformed stream data"),
        }

        if let Some(hook) = &self.on_anomaly {
            hook(anomaly);
        }
    }

    fn release(&mut self) {
        if let Some(mut source) = self.source.take() {
            tracing::trace!(state = ?self.decoder.state(), "releasing stream body");
            source.release();
        }
    }
}

impl Drop for StreamDecoder {
    fn drop(&mut self) {
        self.release();
    }
}
