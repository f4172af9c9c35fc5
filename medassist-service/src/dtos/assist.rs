use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Vital-sign readings as entered by the user.
///
/// Values are opaque text; they are interpolated into the prompt without any
/// numeric or range validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub blood_pressure: String,
    pub blood_sugar: String,
    pub cholesterol: String,
    pub heart_rate: String,
    pub temperature: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PredictionResponse {
    pub prediction: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DocumentSummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StatusMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_metrics_use_camel_case_fields() {
        let metrics: HealthMetrics = serde_json::from_value(serde_json::json!({
            "bloodPressure": "120/80",
            "bloodSugar": "90",
            "cholesterol": "180",
            "heartRate": "72",
            "temperature": "98.6"
        }))
        .unwrap();

        assert_eq!(metrics.blood_pressure, "120/80");
        assert_eq!(metrics.heart_rate, "72");
    }

    #[test]
    fn health_metrics_reject_numbers_and_missing_fields() {
        let numeric = serde_json::from_value::<HealthMetrics>(serde_json::json!({
            "bloodPressure": "120/80",
            "bloodSugar": 90,
            "cholesterol": "180",
            "heartRate": "72",
            "temperature": "98.6"
        }));
        assert!(numeric.is_err());

        let missing = serde_json::from_value::<HealthMetrics>(serde_json::json!({
            "bloodPressure": "120/80"
        }));
        assert!(missing.is_err());
    }

    #[test]
    fn chat_request_accepts_empty_message() {
        let request: ChatRequest =
            serde_json::from_value(serde_json::json!({ "message": "" })).unwrap();
        assert_eq!(request.message, "");
    }
}
