// Shared test doubles for the caller crate's integration tests.
#![allow(dead_code)] // Not every test binary uses every helper

use bytes::Bytes;
use genai_rpc_service::{ChunkSource, RpcTransport, TransportRequest, TransportResponse};
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A chunk source replaying scripted chunks and counting `release` calls.
pub struct MockChunkSource {
    chunks: VecDeque<io::Result<Bytes>>,
    release_count: Arc<AtomicUsize>,
}

impl MockChunkSource {
    pub fn new(chunks: Vec<io::Result<Bytes>>) -> (Self, Arc<AtomicUsize>) {
        let release_count = Arc::new(AtomicUsize::new(0));
        let source = Self {
            chunks: chunks.into(),
            release_count: release_count.clone(),
        };
        (source, release_count)
    }

    pub fn from_strs(chunks: &[&str]) -> (Self, Arc<AtomicUsize>) {
        Self::from_bytes(chunks.iter().map(|chunk| chunk.as_bytes()).collect())
    }

    pub fn from_bytes(chunks: Vec<&[u8]>) -> (Self, Arc<AtomicUsize>) {
        Self::new(
            chunks
                .into_iter()
                .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
                .collect(),
        )
    }
}

#[async_trait::async_trait]
impl ChunkSource for MockChunkSource {
    async fn read_chunk(&mut self) -> io::Result<Option<Bytes>> {
        match self.chunks.pop_front() {
            Some(Ok(chunk)) => Ok(Some(chunk)),
            Some(Err(err)) => Err(err),
            None => Ok(None),
        }
    }

    fn release(&mut self) {
        self.release_count.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn release_count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

/// A scripted reply of `MockTransport`.
pub enum MockReply {
    Response {
        status: u16,
        status_text: &'static str,
        body: Option<MockChunkSource>,
    },
    Fail(io::Error),
}

impl MockReply {
    pub fn json(status: u16, status_text: &'static str, body: &str) -> (Self, Arc<AtomicUsize>) {
        let (source, released) = MockChunkSource::from_strs(&[body]);
        (
            MockReply::Response {
                status,
                status_text,
                body: Some(source),
            },
            released,
        )
    }
}

/// A transport replaying scripted replies in order and recording every request.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RpcTransport for MockTransport {
    async fn issue(&self, request: TransportRequest) -> io::Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left");

        match reply {
            MockReply::Response {
                status,
                status_text,
                body,
            } => Ok(TransportResponse {
                status,
                status_text: status_text.to_string(),
                body: body.map(|source| Box::new(source) as Box<dyn ChunkSource>),
            }),
            MockReply::Fail(err) => Err(err),
        }
    }
}
