mod common;

use bytes::Bytes;
use common::{MockChunkSource, MockReply, MockTransport, release_count};
use futures::StreamExt;
use genai_rpc::frame::DecodeAnomaly;
use genai_rpc::rpc::{RpcDecoderState, RpcStreamEvent};
use genai_rpc_service::TransportResponse;
use genai_rpc_service_caller::{RpcInvoker, StreamDecoder, error::RpcCallerError};
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};

fn decoder_over(source: MockChunkSource) -> StreamDecoder {
    StreamDecoder::new(Box::new(source))
}

async fn collect_events(decoder: &mut StreamDecoder) -> Vec<RpcStreamEvent> {
    let mut events = vec![];
    while let Some(item) = decoder.next_event().await {
        events.push(item.unwrap());
    }
    events
}

#[tokio::test]
async fn test_events_survive_multibyte_chunk_splits() {
    let body = "data: {\"text\":\"héllo \"}\n\ndata: {\"text\":\"wörld 🐘\"}\n\ndata: [DONE]\n\n";
    let bytes = body.as_bytes();
    let e_acute = body.find('é').unwrap();
    let elephant = body.find('🐘').unwrap();

    let (source, released) = MockChunkSource::from_bytes(vec![
        &bytes[..e_acute + 1],
        &bytes[e_acute + 1..elephant + 2],
        &bytes[elephant + 2..],
    ]);
    let mut decoder = decoder_over(source);

    let events = collect_events(&mut decoder).await;

    assert_eq!(
        events,
        vec![
            RpcStreamEvent::Data("héllo ".into()),
            RpcStreamEvent::Data("wörld 🐘".into()),
            RpcStreamEvent::Done,
        ]
    );
    assert_eq!(decoder.state(), RpcDecoderState::Done);
    assert_eq!(release_count(&released), 1);
}

#[tokio::test]
async fn test_done_releases_immediately() {
    let (source, released) = MockChunkSource::from_strs(&[
        "data: {\"text\":\"a\"}\n\ndata: [DONE]\n\n",
        "data: {\"text\":\"never read\"}\n\n",
    ]);
    let mut decoder = decoder_over(source);

    assert_eq!(
        decoder.next_event().await.unwrap().unwrap(),
        RpcStreamEvent::Data("a".into())
    );
    // The sentinel arrived in the same chunk, so the body is already released
    assert_eq!(release_count(&released), 1);
    assert_eq!(
        decoder.next_event().await.unwrap().unwrap(),
        RpcStreamEvent::Done
    );
    assert!(decoder.next_event().await.is_none());

    drop(decoder);
    assert_eq!(release_count(&released), 1);
}

#[tokio::test]
async fn test_dropping_after_first_event_releases_once() {
    let (source, released) = MockChunkSource::from_strs(&[
        "data: {\"text\":\"first\"}\n\n",
        "data: {\"text\":\"second\"}\n\n",
        "data: [DONE]\n\n",
    ]);
    let mut decoder = decoder_over(source);

    assert_eq!(
        decoder.next_event().await.unwrap().unwrap(),
        RpcStreamEvent::Data("first".into())
    );
    assert_eq!(release_count(&released), 0);

    drop(decoder);
    assert_eq!(release_count(&released), 1);
}

#[tokio::test]
async fn test_abandoned_text_stream_releases_once() {
    let (source, released) = MockChunkSource::from_strs(&[
        "data: {\"text\":\"first\"}\n\n",
        "data: {\"text\":\"second\"}\n\n",
    ]);

    let chunks: Vec<String> = decoder_over(source)
        .into_text_stream()
        .take(1)
        .map(|item| item.unwrap())
        .collect()
        .await;

    assert_eq!(chunks, vec!["first".to_string()]);
    assert_eq!(release_count(&released), 1);
}

#[tokio::test]
async fn test_text_stream_surfaces_protocol_error() {
    let (source, released) = MockChunkSource::from_strs(&[
        "data: {\"text\":\"partial\"}\n\ndata: {\"error\":\"model overloaded\"}\n\n",
        "data: {\"text\":\"ignored\"}\n\n",
    ]);

    let items: Vec<_> = decoder_over(source).into_text_stream().collect().await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap(), "partial");
    match &items[1] {
        Err(RpcCallerError::StreamProtocol { message }) => {
            assert_eq!(message, "model overloaded")
        }
        other => panic!("Expected a stream protocol error, got {:?}", other),
    }
    assert_eq!(release_count(&released), 1);
}

#[tokio::test]
async fn test_text_stream_ends_silently_on_done() {
    let (source, _) = MockChunkSource::from_strs(&[
        ": keepalive\n\n",
        "data: {\"text\":\"Hel\"}\n\ndata: {\"text\":\"lo\"}\n\n",
        "data: [DONE]\n\n",
    ]);

    let text: Vec<String> = decoder_over(source)
        .into_text_stream()
        .map(|item| item.unwrap())
        .collect()
        .await;

    assert_eq!(text.concat(), "Hello");
}

#[tokio::test]
async fn test_transport_failure_mid_stream() {
    let (source, released) = MockChunkSource::new(vec![
        Ok(Bytes::from_static(b"data: {\"text\":\"a\"}\n\n")),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer")),
        Ok(Bytes::from_static(b"data: {\"text\":\"b\"}\n\n")),
    ]);
    let mut decoder = decoder_over(source);

    assert_eq!(
        decoder.next_event().await.unwrap().unwrap(),
        RpcStreamEvent::Data("a".into())
    );
    match decoder.next_event().await {
        Some(Err(RpcCallerError::Transport(err))) => {
            assert_eq!(err.kind(), io::ErrorKind::ConnectionReset)
        }
        other => panic!("Expected a transport error, got {:?}", other),
    }
    assert!(decoder.next_event().await.is_none());
    assert_eq!(decoder.state(), RpcDecoderState::Failed);
    assert_eq!(release_count(&released), 1);
}

#[tokio::test]
async fn test_body_end_without_sentinel_closes() {
    let (source, released) = MockChunkSource::from_strs(&[
        "data: {\"text\":\"a\"}\n\n",
        "data: {\"text\":\"trunc",
    ]);
    let anomalies = Arc::new(Mutex::new(vec![]));
    let seen = anomalies.clone();
    let mut decoder = decoder_over(source)
        .with_anomaly_hook(Arc::new(move |anomaly| seen.lock().unwrap().push(anomaly.clone())));

    let events = collect_events(&mut decoder).await;

    assert_eq!(events, vec![RpcStreamEvent::Data("a".into())]);
    assert_eq!(decoder.state(), RpcDecoderState::Closed);
    assert_eq!(release_count(&released), 1);
    assert!(matches!(
        anomalies.lock().unwrap().as_slice(),
        [DecodeAnomaly::TruncatedFrame { .. }]
    ));
}

#[tokio::test]
async fn test_anomaly_hook_sees_malformed_payloads() {
    let (source, _) = MockChunkSource::from_strs(&[
        "data: {not json}\n\ndata: {\"text\":\"ok\"}\n\ndata: {\"other\":1}\n\ndata: [DONE]\n\n",
    ]);
    let anomalies = Arc::new(Mutex::new(vec![]));
    let seen = anomalies.clone();
    let mut decoder = decoder_over(source)
        .with_anomaly_hook(Arc::new(move |anomaly| seen.lock().unwrap().push(anomaly.clone())));

    let events = collect_events(&mut decoder).await;

    assert_eq!(
        events,
        vec![RpcStreamEvent::Data("ok".into()), RpcStreamEvent::Done]
    );
    let anomalies = anomalies.lock().unwrap();
    assert_eq!(anomalies.len(), 2);
    assert!(matches!(anomalies[0], DecodeAnomaly::InvalidJson { .. }));
    assert!(matches!(anomalies[1], DecodeAnomaly::UnrecognizedPayload { .. }));
}

#[tokio::test]
async fn test_open_rejects_non_success_status_and_releases() {
    let (source, released) = MockChunkSource::from_strs(&["upstream unavailable"]);
    let response = TransportResponse {
        status: 503,
        status_text: "Service Unavailable".into(),
        body: Some(Box::new(source)),
    };

    match StreamDecoder::open(response) {
        Err(RpcCallerError::Transport(err)) => {
            assert_eq!(err.to_string(), "HTTP 503: Service Unavailable")
        }
        Err(other) => panic!("Expected a transport error, got {:?}", other),
        Ok(_) => panic!("Expected the stream to be rejected"),
    }
    assert_eq!(release_count(&released), 1);
}

#[tokio::test]
async fn test_open_rejects_missing_body() {
    let response = TransportResponse {
        status: 200,
        status_text: "OK".into(),
        body: None,
    };

    match StreamDecoder::open(response) {
        Err(RpcCallerError::Transport(err)) => {
            assert_eq!(err.to_string(), "Response body is not readable")
        }
        Err(other) => panic!("Expected a transport error, got {:?}", other),
        Ok(_) => panic!("Expected the stream to be rejected"),
    }
}

#[tokio::test]
async fn test_invoker_opens_stream_with_event_stream_headers() {
    let (source, released) =
        MockChunkSource::from_strs(&["data: {\"text\":\"x\"}\n\ndata: [DONE]\n\n"]);
    let transport = MockTransport::with_replies(vec![MockReply::Response {
        status: 200,
        status_text: "OK",
        body: Some(source),
    }]);
    let invoker = RpcInvoker::new(transport, "http://genai.test//")
        .with_headers([("Authorization", "Bearer abc")]);

    let decoder = invoker
        .open_stream(&json!({ "promptUuid": "p1" }))
        .await
        .unwrap();
    let events: Vec<_> = decoder
        .into_stream()
        .map(|item| item.unwrap())
        .collect()
        .await;

    assert_eq!(
        events,
        vec![RpcStreamEvent::Data("x".into()), RpcStreamEvent::Done]
    );
    assert_eq!(release_count(&released), 1);

    let requests = invoker.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://genai.test/stream/generate");
    assert_eq!(requests[0].headers.get("accept"), Some("text/event-stream"));
    assert_eq!(
        requests[0].headers.get("content-type"),
        Some("application/json")
    );
    assert_eq!(requests[0].headers.get("authorization"), Some("Bearer abc"));
}

#[tokio::test]
async fn test_concurrent_streams_are_independent() {
    let (first, _) = MockChunkSource::from_strs(&["data: {\"text\":\"one\"}\n\n", "data: [DONE]\n\n"]);
    let (second, _) = MockChunkSource::from_strs(&["data: {\"text\":\"two\"}\n\ndata: [DONE]\n\n"]);

    let (a, b) = tokio::join!(
        decoder_over(first).into_text_stream().collect::<Vec<_>>(),
        decoder_over(second).into_text_stream().collect::<Vec<_>>()
    );

    assert_eq!(a.len(), 1);
    assert_eq!(a[0].as_ref().unwrap(), "one");
    assert_eq!(b.len(), 1);
    assert_eq!(b[0].as_ref().unwrap(), "two");
}
