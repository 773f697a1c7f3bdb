use bytes::Bytes;
use genai_rpc_service::{
    ChunkSource, RpcTransport, TransportRequest, TransportResponse,
};
use std::io;

/// `RpcTransport` implementation over a `reqwest::Client`.
///
/// Pooling, TLS and HTTP version negotiation are left to the wrapped client;
/// pass a preconfigured one to `with_client` to change them.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl RpcTransport for ReqwestTransport {
    async fn issue(&self, request: TransportRequest) -> io::Result<TransportResponse> {
        let TransportRequest { url, headers, body } = request;

        let mut builder = self.client.post(&url);

        for (name, value) in headers.iter() {
            builder = builder.header(name, value);
        }

        let response = builder.body(body).send().await.map_err(io::Error::other)?;
        let status = response.status();

        tracing::trace!(%url, status = status.as_u16(), "received response head");

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: Some(Box::new(ReqwestChunkSource {
                response: Some(response),
            })),
        })
    }
}

struct ReqwestChunkSource {
    response: Option<reqwest::Response>, // `None` once released
}

#[async_trait::async_trait]
impl ChunkSource for ReqwestChunkSource {
    async fn read_chunk(&mut self) -> io::Result<Option<Bytes>> {
        match self.response.as_mut() {
            Some(response) => response.chunk().await.map_err(io::Error::other),
            None => Ok(None),
        }
    }

    fn release(&mut self) {
        // Dropping the response returns (or closes) the connection
        self.response.take();
    }
}
