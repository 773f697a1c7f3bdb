mod frame_error;
mod sse_frame;
mod sse_frame_decoder;

pub use frame_error::DecodeAnomaly;
pub use sse_frame::SseFrame;
pub use sse_frame_decoder::{SseFrameDecoder, SseFrameIterator};
