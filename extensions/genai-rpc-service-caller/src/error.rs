use genai_rpc::rpc::{TwirpErrorCode, TwirpErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;
use std::io;

/// An application-level failure reported by (or synthesized for) a Twirp call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcError {
    pub code: String,
    pub message: String,
    pub meta: BTreeMap<String, String>,
}

impl RpcError {
    pub fn error_code(&self) -> TwirpErrorCode {
        TwirpErrorCode::from(self.code.as_str())
    }
}

impl From<TwirpErrorEnvelope> for RpcError {
    fn from(envelope: TwirpErrorEnvelope) -> Self {
        RpcError {
            code: envelope.code,
            message: envelope.msg,
            meta: envelope.meta,
        }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Twirp error {}: {}", self.code, self.message)
    }
}

/// Represents errors that can occur during an RPC call or stream from the
/// perspective of the caller.
#[derive(Debug)]
pub enum RpcCallerError {
    /// The request could not be issued, or its response could not be read.
    Transport(io::Error),
    /// The remote service answered a one-shot call with an error.
    Rpc(RpcError),
    /// The remote service reported an error inside a stream.
    StreamProtocol { message: String },
}

impl fmt::Display for RpcCallerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcCallerError::Transport(e) => write!(f, "Transport error: {}", e),
            RpcCallerError::Rpc(e) => write!(f, "{}", e),
            RpcCallerError::StreamProtocol { message } => {
                write!(f, "Stream protocol error: {}", message)
            }
        }
    }
}

impl std::error::Error for RpcCallerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RpcCallerError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RpcCallerError {
    fn from(e: io::Error) -> Self {
        RpcCallerError::Transport(e)
    }
}

impl From<RpcError> for RpcCallerError {
    fn from(e: RpcError) -> Self {
        RpcCallerError::Rpc(e)
    }
}
