pub mod assist;

pub use assist::{
    ChatRequest, ChatResponse, DocumentSummaryResponse, HealthMetrics, PredictionResponse,
    StatusMessage,
};
