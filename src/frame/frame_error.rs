use std::fmt;

/// A non-fatal problem found while decoding a stream.
///
/// Anomalies never terminate a stream. The offending frame (or bytes) is
/// skipped and decoding continues with whatever arrives next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeAnomaly {
    /// Bytes that are not valid UTF-8 were replaced with `U+FFFD`.
    InvalidUtf8 { replaced: usize },

    /// A frame's payload is not valid JSON.
    InvalidJson { raw: String, reason: String },

    /// A frame's payload is valid JSON but carries neither a text nor an error field.
    UnrecognizedPayload { raw: String },

    /// The body ended with bytes that never formed a complete frame.
    TruncatedFrame { pending_bytes: usize },
}

impl fmt::Display for DecodeAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeAnomaly::InvalidUtf8 { replaced } => {
                write!(f, "replaced {} invalid UTF-8 sequence(s)", replaced)
            }
            DecodeAnomaly::InvalidJson { raw, reason } => {
                write!(f, "failed to parse frame payload {:?}: {}", raw, reason)
            }
            DecodeAnomaly::UnrecognizedPayload { raw } => {
                write!(f, "unrecognized frame payload {:?}", raw)
            }
            DecodeAnomaly::TruncatedFrame { pending_bytes } => {
                write!(f, "body ended with {} byte(s) of an incomplete frame", pending_bytes)
            }
        }
    }
}

impl std::error::Error for DecodeAnomaly {}
