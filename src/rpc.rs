mod rpc_endpoint;
mod rpc_header_set;
mod rpc_stream_decoder;
mod rpc_stream_event;
mod twirp_error;
mod twirp_error_code;

pub use rpc_endpoint::RpcEndpoint;
pub use rpc_header_set::RpcHeaderSet;
pub use rpc_stream_decoder::{RpcDecoderState, RpcStreamDecoder, RpcStreamEventIterator};
pub use rpc_stream_event::RpcStreamEvent;
pub use twirp_error::TwirpErrorEnvelope;
pub use twirp_error_code::TwirpErrorCode;
