//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::CondenserConfig;
use crate::extract::PageFetcher;
use crate::pipeline::{ModelClient, Reducer};

/// Shared application state.
///
/// Each request runs its own reduction; the only cross-request coupling is
/// the model client's rate gate, which serializes remote calls on purpose.
pub struct AppState {
    /// Reduction pipeline over the remote model client.
    pub reducer: Reducer<ModelClient>,
    /// Web page fetcher for URL summarization.
    pub fetcher: PageFetcher,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// # Errors
    /// Returns an error if either HTTP client cannot be created.
    pub fn new(
        config: &CondenserConfig,
    ) -> Result<Arc<Self>, Box<dyn std::error::Error + Send + Sync>> {
        let client = ModelClient::new(config)
            .map_err(|e| format!("Failed to create model client: {e}"))?;
        let reducer = Reducer::new(client, config.pipeline.clone());
        let fetcher =
            PageFetcher::new(&config.fetch).map_err(|e| format!("Failed to create fetcher: {e}"))?;

        Ok(Arc::new(Self { reducer, fetcher }))
    }
}
