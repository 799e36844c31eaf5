//! HTTP route handlers for the summarization API.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::extract::{self, ExtractError};

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/summarize", post(summarize_text))
        .route("/api/summarize-file", post(summarize_file))
        .route("/api/summarize-url", post(summarize_url))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "condenser",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// JSON error response carrying a status code.
///
/// Callers only ever see the message here; causes of 5xx responses are
/// logged server-side and replaced with a generic message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

impl From<ExtractError> for ApiError {
    fn from(e: ExtractError) -> Self {
        if e.is_caller_fault() {
            Self::bad_request(e.to_string())
        } else {
            tracing::error!("extraction failed: {e}");
            Self::internal("Processing failed")
        }
    }
}

/// Body of a raw-text summarization request.
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    /// The text to summarize.
    pub text: Option<String>,
}

/// Body of a URL summarization request.
#[derive(Debug, Deserialize)]
pub struct SummarizeUrlRequest {
    /// The page to fetch and summarize.
    pub url: Option<String>,
}

/// Successful summarization response.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// The condensed summary.
    pub summary: String,
}

/// Summarize raw text.
async fn summarize_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let text = request
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Text is required"))?;

    let summary = state.reducer.reduce(&text).await;
    Ok(Json(SummaryResponse { summary }))
}

/// Summarize an uploaded PDF or DOCX document.
async fn summarize_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SummaryResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Malformed upload"))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let extension = std::path::Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let data = field.bytes().await.map_err(|e| {
            tracing::error!("upload read failed: {e}");
            ApiError::internal("File processing failed")
        })?;

        let text = match extension.as_str() {
            "pdf" => extract::extract_pdf(&data)?,
            "docx" => extract::extract_docx(&data)?,
            _ => return Err(ExtractError::UnsupportedFileType(extension).into()),
        };

        let summary = state.reducer.reduce(&text).await;
        return Ok(Json(SummaryResponse { summary }));
    }

    Err(ApiError::bad_request("File is required"))
}

/// Summarize the main content of a web page.
async fn summarize_url(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizeUrlRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let url = request
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("URL is required"))?;

    let text = state.fetcher.fetch_article(&url).await?;
    let summary = state.reducer.reduce(&text).await;
    Ok(Json(SummaryResponse { summary }))
}
