use crate::RpcInvoker;
use crate::error::RpcCallerError;
use genai_rpc_service::{RpcMethod, RpcTransport};

/// Trait for types that represent callable RPC methods.
///
/// This trait forms the final layer of abstraction, allowing downstream
/// users to write `T::call(&invoker, input)` without dealing with method
/// names or serialization explicitly.
#[async_trait::async_trait]
pub trait RpcCall: RpcMethod + Sized + Send + Sync {
    async fn call<T: RpcTransport + 'static>(
        invoker: &RpcInvoker<T>,
        input: Self::Input,
    ) -> Result<Self::Output, RpcCallerError>;
}

#[async_trait::async_trait]
impl<M> RpcCall for M
where
    M: RpcMethod + Send + Sync + 'static,
    M::Input: 'static,
    M::Output: 'static,
{
    async fn call<T: RpcTransport + 'static>(
        invoker: &RpcInvoker<T>,
        input: Self::Input,
    ) -> Result<Self::Output, RpcCallerError> {
        invoker.call(Self::METHOD_NAME, &input).await
    }
}
