//! Remote summarization model client.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::CondenserConfig;
use crate::pipeline::error::PipelineError;

/// Outcome of summarizing one chunk.
///
/// Failures are kept distinguishable until the final join, where they
/// collapse to empty text. The reduction never aborts on a failed chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// The remote model produced a summary (possibly empty).
    Summarized(String),
    /// The call or response parsing failed; the reason is for logs only.
    Failed(String),
}

impl ChunkOutcome {
    /// Collapse the outcome to the text that enters the joined result.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Summarized(text) => text,
            Self::Failed(_) => String::new(),
        }
    }
}

/// Summarizes a single chunk of text.
///
/// The reducer is generic over this trait so tests can stub the remote model.
#[async_trait]
pub trait ChunkSummarizer: Send + Sync {
    /// Summarize one chunk, honoring the client's pacing policy.
    async fn summarize_chunk(&self, chunk: &str) -> ChunkOutcome;
}

/// Pacing gate for remote calls: one in-flight call at a time, with a
/// mandatory delay after each call before the slot is released.
///
/// Kept as an explicit policy object rather than inline sleeps so timeout
/// and cancellation can be layered on top later.
pub struct RateGate {
    slot: Mutex<()>,
    delay: Duration,
}

impl RateGate {
    /// Create a gate with the given post-call delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            slot: Mutex::new(()),
            delay,
        }
    }

    /// Run `call` while holding the slot, then wait out the delay.
    pub async fn pace<F, T>(&self, call: F) -> T
    where
        F: Future<Output = T>,
    {
        let _guard = self.slot.lock().await;
        let out = call.await;
        tokio::time::sleep(self.delay).await;
        out
    }
}

/// Request payload for the remote summarization endpoint.
#[derive(Debug, Serialize)]
struct ModelRequest {
    inputs: String,
    parameters: GenerationParameters,
}

/// Generation parameters sent with every chunk.
#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_length: usize,
    num_beams: u32,
    length_penalty: f32,
    do_sample: bool,
    num_return_sequences: u32,
    no_repeat_ngram_size: u32,
}

/// One element of the model response.
#[derive(Debug, Deserialize)]
struct ModelOutput {
    #[serde(default, alias = "translation_text")]
    summary_text: Option<String>,
}

/// The two response shapes the endpoint is known to produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ModelResponse {
    Batch(Vec<ModelOutput>),
    Single(ModelOutput),
}

/// Client for the configured remote summarization model.
pub struct ModelClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    max_output_length: usize,
    gate: RateGate,
}

impl ModelClient {
    /// Build a client from the service configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &CondenserConfig) -> Result<Self, PipelineError> {
        let http = reqwest::Client::builder()
            .timeout(config.fetch.request_timeout)
            .connect_timeout(config.fetch.connect_timeout)
            .build()
            .map_err(|e| PipelineError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            max_output_length: config.pipeline.max_output_length,
            gate: RateGate::new(config.pipeline.request_delay),
        })
    }

    async fn call_model(&self, chunk: &str) -> Result<String, PipelineError> {
        let body = ModelRequest {
            inputs: format!("summarize: {chunk}"),
            parameters: GenerationParameters {
                max_length: self.max_output_length,
                num_beams: 4,
                length_penalty: 2.0,
                do_sample: false,
                num_return_sequences: 1,
                no_repeat_ngram_size: 2,
            },
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(PipelineError::RemoteStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let value: serde_json::Value = response.json().await?;
        Ok(extract_summary(value))
    }
}

#[async_trait]
impl ChunkSummarizer for ModelClient {
    async fn summarize_chunk(&self, chunk: &str) -> ChunkOutcome {
        self.gate
            .pace(async {
                match self.call_model(chunk).await {
                    Ok(summary) => {
                        debug!(
                            chunk_chars = chunk.chars().count(),
                            summary_chars = summary.chars().count(),
                            "chunk summarized"
                        );
                        ChunkOutcome::Summarized(summary)
                    }
                    Err(e) => {
                        warn!("summarization failed for chunk: {e}");
                        ChunkOutcome::Failed(e.to_string())
                    }
                }
            })
            .await
    }
}

/// Pull the summary text out of a model response.
///
/// Accepts either a batch (array of results) or a single result object;
/// anything else, or a result without a text field, yields an empty string.
fn extract_summary(value: serde_json::Value) -> String {
    match serde_json::from_value::<ModelResponse>(value) {
        Ok(ModelResponse::Batch(outputs)) => outputs
            .into_iter()
            .next()
            .and_then(|o| o.summary_text)
            .unwrap_or_default(),
        Ok(ModelResponse::Single(output)) => output.summary_text.unwrap_or_default(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_from_batch_shape() {
        let value = json!([{ "summary_text": "short version" }]);
        assert_eq!(extract_summary(value), "short version");
    }

    #[test]
    fn test_extract_from_single_shape() {
        let value = json!({ "summary_text": "short version" });
        assert_eq!(extract_summary(value), "short version");
    }

    #[test]
    fn test_extract_accepts_translation_field() {
        let value = json!([{ "translation_text": "resume" }]);
        assert_eq!(extract_summary(value), "resume");
    }

    #[test]
    fn test_malformed_response_is_empty() {
        assert_eq!(extract_summary(json!(42)), "");
        assert_eq!(extract_summary(json!("plain string")), "");
        assert_eq!(extract_summary(json!({ "error": "overloaded" })), "");
        assert_eq!(extract_summary(json!([])), "");
    }

    #[test]
    fn test_outcome_collapses_to_text() {
        assert_eq!(
            ChunkOutcome::Summarized("ok".to_string()).into_text(),
            "ok"
        );
        assert_eq!(ChunkOutcome::Failed("timeout".to_string()).into_text(), "");
    }

    #[tokio::test]
    async fn test_rate_gate_waits_after_call() {
        let gate = RateGate::new(Duration::from_millis(50));
        let started = std::time::Instant::now();
        let value = gate.pace(async { 7 }).await;
        assert_eq!(value, 7);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
