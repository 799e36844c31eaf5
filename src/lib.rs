//! Condenser: an HTTP summarization service built around a chunking and
//! recursive reduction pipeline.
//!
//! Input text is split into sentence-bounded chunks that fit the remote
//! model's input budget, each chunk is summarized sequentially through a
//! rate-limited client, and the joined result is reduced again until it
//! fits the configured token threshold.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Service configuration from the environment.
pub mod config;
/// Text extraction from documents and web pages.
pub mod extract;
/// Chunking, summarization and recursive reduction.
pub mod pipeline;
/// HTTP server and API routes.
pub mod server;
/// Entry helpers to start the service.
pub mod startup;
