use example_genai_service_definition::GenAiClient;
use example_genai_service_definition::types::{
    GenerateRequest, GetHistoryRequest, ListModelsRequest,
};
use example_genai_stream_app::mock_service;
use futures::StreamExt;
use genai_reqwest_rpc_client::ReqwestTransport;
use std::collections::BTreeMap;
use std::io::Write;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Set to target a running GenAI service instead of the in-process mock.
const BASE_URL_ENV_VAR: &str = "GENAI_BASE_URL";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base_url = match std::env::var(BASE_URL_ENV_VAR) {
        Ok(url) => url,
        Err(_) => {
            // Bind to a random available port
            let listener = TcpListener::bind("127.0.0.1:0").await?;
            let addr = listener.local_addr()?;

            tokio::spawn(async move {
                let _ = axum::serve(listener, mock_service::router()).await;
            });

            format!("http://{}/", addr)
        }
    };

    let client = GenAiClient::new(ReqwestTransport::new(), base_url)
        .with_headers([("x-request-source", "example-genai-stream-app")]);

    let models = client.list_models(ListModelsRequest::default()).await?;
    println!("Available models: {:?}", models.models);

    let request = GenerateRequest {
        prompt_uuid: "2f1c0b7e".to_string(),
        model_id: None,
        variables: BTreeMap::from([("subject".to_string(), "tide pools".to_string())]),
    };

    let response = client.generate(request.clone()).await?;
    println!("Generated ({}): {}", response.generation_id, response.text);

    print!("Streamed: ");
    let mut stream = client.generate_stream(&request).await?;
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(text) => {
                print!("{}", text);
                std::io::stdout().flush()?;
            }
            Err(err) => {
                println!();
                eprintln!("Stream failed: {}", err);
                break;
            }
        }
    }
    println!();

    let history = client
        .get_history(GetHistoryRequest {
            document_uuid: Some("missing-document".to_string()),
            ..Default::default()
        })
        .await;
    println!("History lookup for an unknown document: {:?}", history);

    Ok(())
}
