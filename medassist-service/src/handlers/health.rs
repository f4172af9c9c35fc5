use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

use crate::dtos::StatusMessage;
use crate::services::get_metrics;
use crate::startup::AppState;

pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "API is working!".to_string(),
    })
}

/// Answers bare `OPTIONS` requests; real CORS preflights are handled by the
/// CORS layer before routing.
pub async fn preflight() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({})))
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "medassist-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness: the model backend must answer its health check.
pub async fn readiness(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let provider = state.assistant.provider();

    if let Err(e) = provider.health_check().await {
        tracing::warn!(
            provider = provider.name(),
            error = %e,
            "Model provider failed readiness check"
        );
        return Err(AppError::ServiceUnavailable);
    }

    Ok(Json(json!({
        "status": "ready",
        "provider": provider.name(),
        "model": provider.model()
    })))
}

pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        get_metrics(),
    )
}
