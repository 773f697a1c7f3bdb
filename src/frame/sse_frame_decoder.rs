use crate::constants::SSE_FRAME_DELIMITER;
use crate::frame::{DecodeAnomaly, SseFrame};
use crate::utils::Utf8ChunkDecoder;
use std::collections::VecDeque;

/// Reassembles an event-stream body, delivered in arbitrary byte chunks, into
/// complete frames.
///
/// `SseFrameDecoder` accepts chunks exactly as the transport produced them.
/// Text decoding is stateful, so a chunk boundary may fall inside a multi-byte
/// character, inside the frame delimiter, or inside a JSON token without
/// changing the frames produced.
///
/// ### Key Characteristics:
/// - **Stateful**: Holds the unterminated tail of the stream until the next
///   delimiter arrives.
/// - **Order-preserving**: Frames are yielded in the order they complete.
/// - **Lossless**: A complete frame is never dropped; noise lines are filtered
///   later by `SseFrame`.
pub struct SseFrameDecoder {
    text_decoder: Utf8ChunkDecoder,
    buffer: String, // Text after the last complete frame delimiter
    scan_from: usize, // Offset in `buffer` before which no delimiter can start
}

pub struct SseFrameIterator {
    queue: VecDeque<Result<SseFrame, DecodeAnomaly>>,
}

impl Iterator for SseFrameIterator {
    type Item = Result<SseFrame, DecodeAnomaly>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }
}

impl Default for SseFrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SseFrameDecoder {
    pub fn new() -> Self {
        Self {
            text_decoder: Utf8ChunkDecoder::new(),
            buffer: String::new(),
            scan_from: 0,
        }
    }

    // Reads new bytes and extracts every frame they complete
    pub fn read_bytes(&mut self, bytes: &[u8]) -> SseFrameIterator {
        let mut queue = VecDeque::new();

        let replaced_before = self.text_decoder.replacement_count();
        let text = self.text_decoder.decode(bytes);
        let replaced = self.text_decoder.replacement_count() - replaced_before;

        if replaced > 0 {
            queue.push_back(Err(DecodeAnomaly::InvalidUtf8 { replaced }));
        }

        self.buffer.push_str(&text);

        let mut consumed = 0;
        let mut search_from = self.scan_from;

        while let Some(offset) = self.buffer[search_from..].find(SSE_FRAME_DELIMITER) {
            let frame_end = search_from + offset;
            queue.push_back(Ok(SseFrame::parse(&self.buffer[consumed..frame_end])));
            consumed = frame_end + SSE_FRAME_DELIMITER.len();
            search_from = consumed;
        }

        if consumed > 0 {
            self.buffer.drain(..consumed);
        }

        // Only a delimiter straddling the end of the buffer can still complete
        let mut resume = self
            .buffer
            .len()
            .saturating_sub(SSE_FRAME_DELIMITER.len() - 1);
        while !self.buffer.is_char_boundary(resume) {
            resume -= 1;
        }
        self.scan_from = resume;

        SseFrameIterator { queue }
    }

    /// Number of received bytes not yet part of a complete frame.
    pub fn pending_len(&self) -> usize {
        self.buffer.len() + self.text_decoder.pending_len()
    }

    /// Discards everything buffered so far.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.scan_from = 0;
        self.text_decoder.reset();
    }
}
