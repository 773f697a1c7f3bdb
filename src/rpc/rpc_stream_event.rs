/// A decoded unit of a generation stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcStreamEvent {
    /// A content chunk.
    Data(String),

    /// The peer sent the end-of-stream sentinel. Nothing follows.
    Done,

    /// The peer reported an error inside an otherwise healthy stream. Nothing follows.
    ProtocolError(String),
}

impl RpcStreamEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RpcStreamEvent::Data(_))
    }
}
