//! The request flow shared by every endpoint: optional extraction, prompt
//! rendering, one model call.

use crate::error::AssistError;
use crate::services::extraction::{self, DocumentFormat, ExtractionError};
use crate::services::metrics;
use crate::services::prompts::Prompt;
use crate::services::providers::TextProvider;
use axum::body::Bytes;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct Assistant {
    provider: Arc<dyn TextProvider>,
}

impl Assistant {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn TextProvider {
        self.provider.as_ref()
    }

    /// Render `prompt` and return the model's text completion.
    pub async fn complete(&self, prompt: Prompt<'_>) -> Result<String, AssistError> {
        let text = prompt.build();
        let provider = self.provider.as_ref();
        let start = Instant::now();

        let result = provider.generate(&text).await;
        let elapsed = start.elapsed().as_secs_f64();
        metrics::record_provider_latency(provider.name(), provider.model(), elapsed);

        match result {
            Ok(response) => {
                metrics::record_tokens(
                    provider.model(),
                    response.input_tokens,
                    response.output_tokens,
                );
                tracing::info!(
                    kind = prompt.kind(),
                    provider = provider.name(),
                    model = provider.model(),
                    prompt_len = text.len(),
                    response_len = response.text.len(),
                    finish_reason = response.finish_reason.as_str(),
                    latency_secs = elapsed,
                    "Model completion received"
                );
                Ok(response.text)
            }
            Err(e) => {
                metrics::record_provider_error(provider.name(), e.error_type());
                tracing::error!(
                    kind = prompt.kind(),
                    provider = provider.name(),
                    model = provider.model(),
                    error = %e,
                    "Model completion failed"
                );
                Err(AssistError::Model(e))
            }
        }
    }

    /// Extract the upload's text and ask the model for a summary.
    ///
    /// The format is resolved from `filename` first; an unsupported extension
    /// fails before the content is parsed or the model is called.
    pub async fn summarize_document(
        &self,
        filename: &str,
        content: Bytes,
    ) -> Result<String, AssistError> {
        let format = DocumentFormat::from_filename(filename).ok_or_else(|| {
            tracing::warn!(filename = %filename, "Rejected upload with unsupported extension");
            AssistError::UnsupportedFormat
        })?;

        let document_text =
            tokio::task::spawn_blocking(move || extraction::extract(&content, format))
                .await
                .map_err(|e| ExtractionError::Interrupted(e.to_string()))??;

        self.complete(Prompt::Summarize {
            document_text: &document_text,
        })
        .await
    }
}
