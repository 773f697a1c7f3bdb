pub mod error;
mod rpc_call;
pub use rpc_call::*;
mod rpc_invoker;
pub use rpc_invoker::*;
mod stream_decoder;
pub use stream_decoder::*;
