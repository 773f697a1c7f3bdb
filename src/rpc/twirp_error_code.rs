use std::fmt;

/// The error codes defined by the Twirp wire protocol.
///
/// Codes are transmitted as strings. Anything outside the standard set is kept
/// verbatim in `Other` so no information is lost when a peer extends the set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TwirpErrorCode {
    Canceled,
    Unknown,
    InvalidArgument,
    Malformed,
    DeadlineExceeded,
    NotFound,
    BadRoute,
    AlreadyExists,
    PermissionDenied,
    Unauthenticated,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Other(String),
}

impl TwirpErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            TwirpErrorCode::Canceled => "canceled",
            TwirpErrorCode::Unknown => "unknown",
            TwirpErrorCode::InvalidArgument => "invalid_argument",
            TwirpErrorCode::Malformed => "malformed",
            TwirpErrorCode::DeadlineExceeded => "deadline_exceeded",
            TwirpErrorCode::NotFound => "not_found",
            TwirpErrorCode::BadRoute => "bad_route",
            TwirpErrorCode::AlreadyExists => "already_exists",
            TwirpErrorCode::PermissionDenied => "permission_denied",
            TwirpErrorCode::Unauthenticated => "unauthenticated",
            TwirpErrorCode::ResourceExhausted => "resource_exhausted",
            TwirpErrorCode::FailedPrecondition => "failed_precondition",
            TwirpErrorCode::Aborted => "aborted",
            TwirpErrorCode::OutOfRange => "out_of_range",
            TwirpErrorCode::Unimplemented => "unimplemented",
            TwirpErrorCode::Internal => "internal",
            TwirpErrorCode::Unavailable => "unavailable",
            TwirpErrorCode::DataLoss => "data_loss",
            TwirpErrorCode::Other(code) => code,
        }
    }
}

impl From<&str> for TwirpErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "canceled" => TwirpErrorCode::Canceled,
            "unknown" => TwirpErrorCode::Unknown,
            "invalid_argument" => TwirpErrorCode::InvalidArgument,
            "malformed" => TwirpErrorCode::Malformed,
            "deadline_exceeded" => TwirpErrorCode::DeadlineExceeded,
            "not_found" => TwirpErrorCode::NotFound,
            "bad_route" => TwirpErrorCode::BadRoute,
            "already_exists" => TwirpErrorCode::AlreadyExists,
            "permission_denied" => TwirpErrorCode::PermissionDenied,
            "unauthenticated" => TwirpErrorCode::Unauthenticated,
            "resource_exhausted" => TwirpErrorCode::ResourceExhausted,
            "failed_precondition" => TwirpErrorCode::FailedPrecondition,
            "aborted" => TwirpErrorCode::Aborted,
            "out_of_range" => TwirpErrorCode::OutOfRange,
            "unimplemented" => TwirpErrorCode::Unimplemented,
            "internal" => TwirpErrorCode::Internal,
            "unavailable" => TwirpErrorCode::Unavailable,
            "data_loss" => TwirpErrorCode::DataLoss,
            other => TwirpErrorCode::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TwirpErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
