use bytes::Bytes;
use genai_rpc::rpc::RpcHeaderSet;
use std::io;

/// A fully prepared outgoing request. Every GenAI endpoint is issued as a POST.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub headers: RpcHeaderSet,
    pub body: Vec<u8>,
}

/// An incrementally delivered response body.
///
/// The owner of a chunk source is responsible for calling `release` once it is
/// finished with the body, whether or not the body was read to the end.
#[async_trait::async_trait]
pub trait ChunkSource: Send {
    /// Returns the next chunk, or `None` once the body is exhausted.
    async fn read_chunk(&mut self) -> io::Result<Option<Bytes>>;

    /// Releases the underlying connection. Reads after a release return `None`.
    fn release(&mut self);
}

/// The response to a `TransportRequest`.
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Option<Box<dyn ChunkSource>>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Reads the whole body into memory and releases it.
    ///
    /// An absent body reads as empty.
    pub async fn read_body(&mut self) -> io::Result<Vec<u8>> {
        let Some(mut source) = self.body.take() else {
            return Ok(Vec::new());
        };

        let mut buffer = Vec::new();
        let result = loop {
            match source.read_chunk().await {
                Ok(Some(chunk)) => buffer.extend_from_slice(&chunk),
                Ok(None) => break Ok(buffer),
                Err(err) => break Err(err),
            }
        };

        source.release();
        result
    }
}

/// The collaborator that actually talks to the network.
///
/// Connection pooling, TLS, HTTP version, authentication and retries are all
/// properties of the implementation; callers only see a single request and its
/// response.
#[async_trait::async_trait]
pub trait RpcTransport: Send + Sync {
    async fn issue(&self, request: TransportRequest) -> io::Result<TransportResponse>;
}
