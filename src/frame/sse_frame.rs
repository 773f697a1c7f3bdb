use crate::constants::{SSE_DATA_PREFIX, SSE_LINE_SEPARATOR};

/// A single delimited unit of an event stream.
///
/// Only `data: ` lines are retained. Comment lines (`: keepalive`), field
/// lines the client does not act on (`event:`, `id:`, `retry:`) and blank
/// lines are protocol noise. Multiple data lines in one frame are joined with
/// a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    data: Option<String>,
}

impl SseFrame {
    /// Parses the text of one frame, without its trailing delimiter.
    pub fn parse(frame_text: &str) -> Self {
        let mut data: Option<String> = None;

        for line in frame_text.split(SSE_LINE_SEPARATOR) {
            if let Some(payload) = line.strip_prefix(SSE_DATA_PREFIX) {
                match data.as_mut() {
                    Some(existing) => {
                        existing.push(SSE_LINE_SEPARATOR);
                        existing.push_str(payload);
                    }
                    None => data = Some(payload.to_string()),
                }
            }
        }

        Self { data }
    }

    /// The payload with its `data: ` prefix stripped, if the frame has one.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn is_payload_bearing(&self) -> bool {
        self.data.is_some()
    }
}
