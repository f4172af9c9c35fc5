use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::dtos::{ChatRequest, ChatResponse, HealthMetrics, PredictionResponse};
use crate::services::metrics;
use crate::services::prompts::Prompt;
use crate::startup::AppState;

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let result = state
        .assistant
        .complete(Prompt::Chat {
            message: &request.message,
        })
        .await;

    match result {
        Ok(response) => {
            metrics::record_request("chat", "success");
            Ok(Json(ChatResponse { response }))
        }
        Err(e) => {
            metrics::record_request("chat", e.outcome());
            Err(e.into())
        }
    }
}

pub async fn predict(
    State(state): State<AppState>,
    Json(health_metrics): Json<HealthMetrics>,
) -> Result<Json<PredictionResponse>, AppError> {
    let result = state
        .assistant
        .complete(Prompt::Predict(&health_metrics))
        .await;

    match result {
        Ok(prediction) => {
            metrics::record_request("predict", "success");
            Ok(Json(PredictionResponse { prediction }))
        }
        Err(e) => {
            metrics::record_request("predict", e.outcome());
            Err(e.into())
        }
    }
}
