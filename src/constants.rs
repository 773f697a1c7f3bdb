// SSE framing constants

/// Terminates every frame on the stream. Bytes after the last delimiter stay
/// buffered until the next chunk completes them.
pub const SSE_FRAME_DELIMITER: &str = "\n\n";

/// Separates lines within a single frame.
pub const SSE_LINE_SEPARATOR: char = '\n';

/// Prefix of a payload-bearing line. Lines without it are comments or keepalives.
pub const SSE_DATA_PREFIX: &str = "data: ";

/// Payload literal which ends the stream, regardless of what follows it.
pub const SSE_DONE_SENTINEL: &str = "[DONE]";

/// Field of a stream payload carrying a content chunk.
pub const SSE_PAYLOAD_TEXT_FIELD: &str = "text";

/// Field of a stream payload carrying an in-band error message.
pub const SSE_PAYLOAD_ERROR_FIELD: &str = "error";

// Endpoint constants

/// Path segment placed between the base address and the service identifier.
pub const TWIRP_PATH_PREFIX: &str = "twirp";

/// Fully qualified service name of the GenAI protobuf service.
pub const GENAI_SERVICE_IDENTIFIER: &str = "elephant.genai.GenAI";

/// Path (relative to the base address) of the streaming generation endpoint.
pub const STREAM_GENERATE_PATH: &str = "stream/generate";

// Header constants

pub const CONTENT_TYPE_HEADER: &str = "content-type";
pub const ACCEPT_HEADER: &str = "accept";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const EVENT_STREAM_CONTENT_TYPE: &str = "text/event-stream";

// Error translation constants

/// Twirp code used when the peer's error body is absent or malformed.
pub const TWIRP_FALLBACK_ERROR_CODE: &str = "internal";

/// Maximum number of body bytes included in diagnostics about an unreadable
/// error body.
pub const ERROR_BODY_EXCERPT_LEN: usize = 256;
