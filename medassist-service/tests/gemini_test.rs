//! Gemini provider tests against a local stand-in for the
//! `generateContent` REST endpoint.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use medassist_service::error::AssistError;
use medassist_service::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use medassist_service::services::providers::{FinishReason, ProviderError, TextProvider};
use serde_json::{json, Value};
use service_core::error::AppError;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const API_KEY: &str = "test-api-key";

#[derive(Clone)]
struct FakeGemini {
    status: StatusCode,
    reply: Value,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

async fn generate_content(
    State(fake): State<FakeGemini>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"message": "API key not valid"}})),
        );
    }
    fake.requests.lock().unwrap().push((call, body));
    (fake.status, Json(fake.reply.clone()))
}

async fn list_models(headers: HeaderMap) -> StatusCode {
    match headers.get("x-goog-api-key") {
        Some(_) => StatusCode::OK,
        None => StatusCode::UNAUTHORIZED,
    }
}

/// Serve the fake API on a random port; returns its base URL.
async fn spawn_fake(fake: FakeGemini) -> String {
    let app = Router::new()
        .route("/v1beta/models", get(list_models))
        .route("/v1beta/models/:call", post(generate_content))
        .with_state(fake);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://127.0.0.1:{}/v1beta", port)
}

fn provider(api_base: String, api_key: &str) -> GeminiTextProvider {
    GeminiTextProvider::new(GeminiConfig {
        api_key: api_key.to_string(),
        model: "gemini-2.0-flash".to_string(),
        api_base,
    })
    .unwrap()
}

fn fake(status: StatusCode, reply: Value) -> FakeGemini {
    FakeGemini {
        status,
        reply,
        requests: Arc::new(Mutex::new(Vec::new())),
    }
}

#[tokio::test]
async fn generate_sends_prompt_and_returns_text() {
    let fake = fake(
        StatusCode::OK,
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Stay "}, {"text": "hydrated."}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 3}
        }),
    );
    let requests = fake.requests.clone();
    let base = spawn_fake(fake).await;

    let response = provider(base, API_KEY).generate("Hello").await.unwrap();

    assert_eq!(response.text, "Stay hydrated.");
    assert_eq!(response.input_tokens, 12);
    assert_eq!(response.output_tokens, 3);
    assert_eq!(response.finish_reason, FinishReason::Complete);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "gemini-2.0-flash:generateContent");
    assert_eq!(requests[0].1["contents"][0]["parts"][0]["text"], "Hello");
}

#[tokio::test]
async fn rate_limit_keeps_upstream_message() {
    let base = spawn_fake(fake(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "Quota exceeded for quota metric 'generate_content_requests'"}}),
    ))
    .await;

    let err = provider(base, API_KEY).generate("Hello").await.unwrap_err();

    match &err {
        ProviderError::RateLimited(body) => assert!(body.contains("Quota exceeded"), "{body}"),
        other => panic!("unexpected error: {other:?}"),
    }

    let detail = AppError::from(AssistError::Model(err)).to_string();
    assert!(detail.starts_with("Error in processing the request: "), "{detail}");
    assert!(detail.contains("Quota exceeded"), "{detail}");
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let base = spawn_fake(fake(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": {"message": "backend exploded"}}),
    ))
    .await;

    let err = provider(base, API_KEY).generate("Hello").await.unwrap_err();

    match err {
        ProviderError::ApiError(message) => {
            assert!(message.contains("500"), "{message}");
            assert!(message.contains("backend exploded"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn wrong_key_is_api_error_without_leaking_key() {
    let base = spawn_fake(fake(StatusCode::OK, json!({}))).await;

    let err = provider(base, "wrong-key").generate("Hello").await.unwrap_err();

    assert!(matches!(err, ProviderError::ApiError(_)));
    assert!(!err.to_string().contains("wrong-key"));
}

#[tokio::test]
async fn blocked_prompt_is_content_filtered() {
    let base = spawn_fake(fake(
        StatusCode::OK,
        json!({"promptFeedback": {"blockReason": "SAFETY"}}),
    ))
    .await;

    let err = provider(base, API_KEY).generate("Hello").await.unwrap_err();

    assert!(matches!(err, ProviderError::ContentFiltered(_)));
    assert!(err.to_string().contains("SAFETY"), "{err}");
}

#[tokio::test]
async fn unreachable_api_is_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let err = provider(format!("http://127.0.0.1:{}/v1beta", port), API_KEY)
        .generate("Hello")
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NetworkError(_)));
    assert!(!err.to_string().contains(API_KEY));
}

#[tokio::test]
async fn health_check_lists_models() {
    let base = spawn_fake(fake(StatusCode::OK, json!({}))).await;

    assert!(provider(base, API_KEY).health_check().await.is_ok());
}
