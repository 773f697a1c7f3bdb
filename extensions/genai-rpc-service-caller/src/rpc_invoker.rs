use crate::StreamDecoder;
use crate::error::{RpcCallerError, RpcError};
use genai_rpc::constants::{
    ACCEPT_HEADER, EVENT_STREAM_CONTENT_TYPE, GENAI_SERVICE_IDENTIFIER, JSON_CONTENT_TYPE,
};
use genai_rpc::rpc::{RpcEndpoint, RpcHeaderSet, TwirpErrorEnvelope};
use genai_rpc_service::{RpcTransport, TransportRequest};
use serde::{Serialize, de::DeserializeOwned};
use std::io;
use std::sync::Arc;

/// Issues single-shot Twirp calls and opens generation streams over an
/// injected `RpcTransport`.
///
/// An invoker is immutable: the base address and static headers are fixed at
/// construction, and `with_headers` returns a new invoker sharing the same
/// transport. Clones are cheap and may be used from any number of tasks
/// concurrently.
pub struct RpcInvoker<T: RpcTransport> {
    transport: Arc<T>,
    endpoint: RpcEndpoint,
    service_identifier: Arc<str>,
    headers: Arc<RpcHeaderSet>,
}

impl<T: RpcTransport> Clone for RpcInvoker<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            endpoint: self.endpoint.clone(),
            service_identifier: Arc::clone(&self.service_identifier),
            headers: Arc::clone(&self.headers),
        }
    }
}

impl<T: RpcTransport> RpcInvoker<T> {
    /// Creates an invoker for the GenAI service at `base_address`.
    pub fn new(transport: T, base_address: impl Into<String>) -> Self {
        Self::with_shared_transport(Arc::new(transport), base_address)
    }

    pub fn with_shared_transport(transport: Arc<T>, base_address: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: RpcEndpoint::new(base_address),
            service_identifier: Arc::from(GENAI_SERVICE_IDENTIFIER),
            headers: Arc::new(RpcHeaderSet::new()),
        }
    }

    /// Targets a different Twirp service on the same base address.
    pub fn with_service_identifier(&self, service_identifier: &str) -> Self {
        Self {
            service_identifier: Arc::from(service_identifier),
            ..self.clone()
        }
    }

    /// Returns a new invoker with `headers` merged over the current static
    /// headers. `self` is left untouched.
    pub fn with_headers<I, K, V>(&self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let extra: RpcHeaderSet = headers.into_iter().collect();

        Self {
            headers: Arc::new(self.headers.merged(&extra)),
            ..self.clone()
        }
    }

    pub fn endpoint(&self) -> &RpcEndpoint {
        &self.endpoint
    }

    pub fn headers(&self) -> &RpcHeaderSet {
        &self.headers
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Performs one Twirp call.
    ///
    /// A non-success status always fails with `RpcCallerError::Rpc`, using the
    /// peer's `{code, msg}` body when it is usable and a synthesized
    /// `internal` error otherwise. A success body is deserialized into `Resp`
    /// as-is.
    pub async fn call<Req, Resp>(
        &self,
        method_name: &str,
        request: &Req,
    ) -> Result<Resp, RpcCallerError>
    where
        Req: Serialize + ?Sized + Sync,
        Resp: DeserializeOwned,
    {
        if method_name.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "RPC method name must not be empty",
            )
            .into());
        }

        let url = self
            .endpoint
            .method_url(&self.service_identifier, method_name);

        let defaults = RpcHeaderSet::from_iter([(ACCEPT_HEADER, JSON_CONTENT_TYPE)]);
        let request = TransportRequest {
            url,
            headers: self.headers.for_json_request(&defaults),
            body: encode_json(request)?,
        };

        tracing::trace!(url = %request.url, "issuing RPC call");

        let mut response = self.transport.issue(request).await?;
        let body = response.read_body().await;

        if !response.is_success() {
            // An unreadable error body is handled like a malformed one
            let body = body.unwrap_or_default();
            let envelope = TwirpErrorEnvelope::from_response_body(
                response.status,
                &response.status_text,
                &body,
            );

            return Err(RpcError::from(envelope).into());
        }

        serde_json::from_slice(&body?)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err).into())
    }

    /// Opens the generation stream for `request`.
    ///
    /// Fails before producing any event if the transport fails, the status is
    /// not a success, or the response has no body.
    pub async fn open_stream<Req>(&self, request: &Req) -> Result<StreamDecoder, RpcCallerError>
    where
        Req: Serialize + ?Sized + Sync,
    {
        let defaults = RpcHeaderSet::from_iter([(ACCEPT_HEADER, EVENT_STREAM_CONTENT_TYPE)]);
        let request = TransportRequest {
            url: self.endpoint.stream_url(),
            headers: self.headers.for_json_request(&defaults),
            body: encode_json(request)?,
        };

        tracing::trace!(url = %request.url, "opening stream");

        let response = self.transport.issue(request).await?;
        StreamDecoder::open(response)
    }
}

fn encode_json<Req: Serialize + ?Sized>(request: &Req) -> Result<Vec<u8>, RpcCallerError> {
    serde_json::to_vec(request)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err).into())
}
