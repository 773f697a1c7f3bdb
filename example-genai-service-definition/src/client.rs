use crate::methods::{Generate, GetHistory, ListModels};
use crate::types::{
    GenerateRequest, GenerateResponse, GetHistoryRequest, GetHistoryResponse, ListModelsRequest,
    ListModelsResponse,
};
use futures::StreamExt;
use futures::stream::BoxStream;
use genai_rpc_service::RpcTransport;
use genai_rpc_service_caller::{RpcCall, RpcInvoker, error::RpcCallerError};

/// Typed client for the GenAI service.
pub struct GenAiClient<T: RpcTransport> {
    invoker: RpcInvoker<T>,
}

impl<T: RpcTransport> Clone for GenAiClient<T> {
    fn clone(&self) -> Self {
        Self {
            invoker: self.invoker.clone(),
        }
    }
}

impl<T: RpcTransport + 'static> GenAiClient<T> {
    pub fn new(transport: T, base_address: impl Into<String>) -> Self {
        Self::from_invoker(RpcInvoker::new(transport, base_address))
    }

    pub fn from_invoker(invoker: RpcInvoker<T>) -> Self {
        Self { invoker }
    }

    pub fn invoker(&self) -> &RpcInvoker<T> {
        &self.invoker
    }

    /// Returns a client sending `headers` in addition to (and over) the
    /// current static headers.
    pub fn with_headers<I, K, V>(&self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self::from_invoker(self.invoker.with_headers(headers))
    }

    pub async fn generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, RpcCallerError> {
        Generate::call(&self.invoker, request).await
    }

    /// Streams the generated text chunk by chunk.
    pub async fn generate_stream(
        &self,
        request: &GenerateRequest,
    ) -> Result<BoxStream<'static, Result<String, RpcCallerError>>, RpcCallerError> {
        let decoder = self.invoker.open_stream(request).await?;
        Ok(decoder.into_text_stream().boxed())
    }

    pub async fn list_models(
        &self,
        request: ListModelsRequest,
    ) -> Result<ListModelsResponse, RpcCallerError> {
        ListModels::call(&self.invoker, request).await
    }

    pub async fn get_history(
        &self,
        request: GetHistoryRequest,
    ) -> Result<GetHistoryResponse, RpcCallerError> {
        GetHistory::call(&self.invoker, request).await
    }
}
