//! An in-process stand-in for the GenAI service, good enough to drive the
//! client end to end: Twirp JSON methods plus the event-stream endpoint.

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use example_genai_service_definition::types::{
    GenerateRequest, GenerateResponse, GenerationMetadata, GetHistoryRequest, GetHistoryResponse,
    ListModelsResponse, Model,
};
use futures::StreamExt;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;

/// Delay between two stream frames, so the client visibly receives them one by one.
const STREAM_FRAME_INTERVAL: Duration = Duration::from_millis(40);

pub fn router() -> Router {
    Router::new()
        .route("/twirp/elephant.genai.GenAI/{method}", post(twirp_method))
        .route("/stream/generate", post(stream_generate))
}

async fn twirp_method(Path(method): Path<String>, body: Bytes) -> Response {
    tracing::info!(%method, "mock service received call");

    match method.as_str() {
        "Generate" => match serde_json::from_slice::<GenerateRequest>(&body) {
            Ok(request) => Json(generate(&request)).into_response(),
            Err(err) => twirp_error(StatusCode::BAD_REQUEST, "malformed", &err.to_string()),
        },
        "ListModels" => Json(list_models()).into_response(),
        "GetHistory" => match serde_json::from_slice::<GetHistoryRequest>(&body) {
            Ok(GetHistoryRequest {
                document_uuid: Some(uuid),
                ..
            }) => twirp_error(
                StatusCode::NOT_FOUND,
                "not_found",
                &format!("no history for document {}", uuid),
            ),
            Ok(_) => Json(GetHistoryResponse::default()).into_response(),
            Err(err) => twirp_error(StatusCode::BAD_REQUEST, "malformed", &err.to_string()),
        },
        other => twirp_error(
            StatusCode::NOT_FOUND,
            "bad_route",
            &format!("no handler for method {}", other),
        ),
    }
}

async fn stream_generate(Json(request): Json<GenerateRequest>) -> Response {
    let text = generate(&request).text;

    let mut frames: Vec<String> = vec![": keepalive\n\n".to_string()];
    frames.extend(
        text.split_inclusive(' ')
            .map(|word| format!("data: {}\n\n", json!({ "text": word }))),
    );
    frames.push("data: [DONE]\n\n".to_string());

    let body = futures::stream::iter(frames).then(|frame| async move {
        tokio::time::sleep(STREAM_FRAME_INTERVAL).await;
        Ok::<_, Infallible>(frame)
    });

    (
        [(header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(body),
    )
        .into_response()
}

fn generate(request: &GenerateRequest) -> GenerateResponse {
    let subject = request
        .variables
        .get("subject")
        .map(String::as_str)
        .unwrap_or("the world");

    GenerateResponse {
        generation_id: format!("gen-{}", request.prompt_uuid),
        text: format!("Here is a short note about {} ✨ generated by the mock.", subject),
        metadata: Some(GenerationMetadata {
            prompt_tokens: 12,
            completion_tokens: 11,
            cost_usd: 0.0,
            duration_ms: 5,
            model: request
                .model_id
                .clone()
                .unwrap_or_else(|| "mock-small".to_string()),
        }),
    }
}

fn list_models() -> ListModelsResponse {
    ListModelsResponse {
        models: vec![Model {
            id: "mock-small".to_string(),
            provider: "mock".to_string(),
            name: "small".to_string(),
            display_name: "Mock Small".to_string(),
            streaming_supported: true,
            vision_supported: false,
            enabled: true,
        }],
    }
}

fn twirp_error(status: StatusCode, code: &str, msg: &str) -> Response {
    (status, Json(json!({ "code": code, "msg": msg }))).into_response()
}
