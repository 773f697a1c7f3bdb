use crate::{
    constants::{SSE_DONE_SENTINEL, SSE_PAYLOAD_ERROR_FIELD, SSE_PAYLOAD_TEXT_FIELD},
    frame::{DecodeAnomaly, SseFrameDecoder},
    rpc::RpcStreamEvent,
};
use serde_json::Value;
use std::collections::VecDeque;

/// Turns the bytes of a generation stream into `RpcStreamEvent`s.
///
/// The decoder is a plain state machine with no I/O of its own: the owner
/// feeds it chunks with `read_bytes` and reports end-of-body with `finish`.
/// Once a terminal state is reached every further byte is ignored, so a
/// `[DONE]` sentinel or an in-band error is authoritative even when the peer
/// keeps sending.
pub struct RpcStreamDecoder {
    state: RpcDecoderState,
    frames: SseFrameDecoder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcDecoderState {
    /// Awaiting more bytes or end-of-body.
    Open,
    /// The end-of-stream sentinel was observed.
    Done,
    /// A transport fault or an in-band protocol error ended the stream.
    Failed,
    /// The body was exhausted without a sentinel.
    Closed,
}

impl RpcDecoderState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RpcDecoderState::Open)
    }
}

pub struct RpcStreamEventIterator {
    queue: VecDeque<Result<RpcStreamEvent, DecodeAnomaly>>,
}

impl Iterator for RpcStreamEventIterator {
    type Item = Result<RpcStreamEvent, DecodeAnomaly>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }
}

impl Default for RpcStreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcStreamDecoder {
    pub fn new() -> Self {
        Self {
            state: RpcDecoderState::Open,
            frames: SseFrameDecoder::new(),
        }
    }

    pub fn state(&self) -> RpcDecoderState {
        self.state
    }

    /// Decodes a chunk of the body.
    ///
    /// `Ok` items are events for the consumer, in arrival order; a terminal
    /// event is always the last `Ok` item. `Err` items are anomalies the
    /// decoder recovered from.
    pub fn read_bytes(&mut self, bytes: &[u8]) -> RpcStreamEventIterator {
        let mut queue = VecDeque::new();

        if self.state.is_terminal() {
            return RpcStreamEventIterator { queue };
        }

        for frame_result in self.frames.read_bytes(bytes) {
            let frame = match frame_result {
                Ok(frame) => frame,
                Err(anomaly) => {
                    queue.push_back(Err(anomaly));
                    continue;
                }
            };

            let Some(raw) = frame.data() else {
                continue;
            };

            if raw == SSE_DONE_SENTINEL {
                self.terminate(RpcDecoderState::Done);
                queue.push_back(Ok(RpcStreamEvent::Done));
                break;
            }

            match decode_payload(raw) {
                Ok(event @ RpcStreamEvent::ProtocolError(_)) => {
                    self.terminate(RpcDecoderState::Failed);
                    queue.push_back(Ok(event));
                    break;
                }
                Ok(event) => queue.push_back(Ok(event)),
                Err(anomaly) => queue.push_back(Err(anomaly)),
            }
        }

        RpcStreamEventIterator { queue }
    }

    /// Marks the body as exhausted.
    ///
    /// Returns an anomaly if unterminated bytes were still buffered; they are
    /// discarded.
    pub fn finish(&mut self) -> Option<DecodeAnomaly> {
        if self.state.is_terminal() {
            return None;
        }

        let pending_bytes = self.frames.pending_len();
        self.terminate(RpcDecoderState::Closed);

        (pending_bytes > 0).then_some(DecodeAnomaly::TruncatedFrame { pending_bytes })
    }

    /// Marks the stream as failed for a reason outside the byte stream itself
    /// (e.g. the transport could not deliver the next chunk).
    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.terminate(RpcDecoderState::Failed);
        }
    }

    fn terminate(&mut self, state: RpcDecoderState) {
        tracing::trace!(?state, "stream decoder reached terminal state");
        self.state = state;
        self.frames.clear();
    }
}

fn decode_payload(raw: &str) -> Result<RpcStreamEvent, DecodeAnomaly> {
    let value: Value = serde_json::from_str(raw).map_err(|err| DecodeAnomaly::InvalidJson {
        raw: raw.to_string(),
        reason: err.to_string(),
    })?;

    if let Some(message) = value.get(SSE_PAYLOAD_ERROR_FIELD).and_then(error_message) {
        return Ok(RpcStreamEvent::ProtocolError(message));
    }

    match value.get(SSE_PAYLOAD_TEXT_FIELD).and_then(Value::as_str) {
        Some(text) if !text.is_empty() => Ok(RpcStreamEvent::Data(text.to_string())),
        _ => Err(DecodeAnomaly::UnrecognizedPayload {
            raw: raw.to_string(),
        }),
    }
}

// `null`, `false`, `0` and `""` mean "no error"
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
