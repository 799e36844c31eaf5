//! Error types for the summarization pipeline.

use thiserror::Error;

/// Errors raised while talking to the remote summarization model.
///
/// Per-chunk failures never escape the pipeline; they are logged and
/// collapsed into empty summaries at the final join.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// HTTP transport failure.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// HTTP client construction error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// The remote endpoint answered with a non-success status.
    #[error("remote returned status {status}: {body}")]
    RemoteStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, for the server-side log.
        body: String,
    },
}
