mod reqwest_transport;
use genai_rpc_service_caller::RpcInvoker;
pub use reqwest_transport::ReqwestTransport;

/// An `RpcInvoker` backed by `reqwest`.
pub type RpcClient = RpcInvoker<ReqwestTransport>;

/// Creates an `RpcClient` for the service at `base_address` using a default
/// `reqwest::Client`.
pub fn rpc_client(base_address: &str) -> RpcClient {
    RpcInvoker::new(ReqwestTransport::new(), base_address)
}
