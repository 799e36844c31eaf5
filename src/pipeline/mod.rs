//! The chunking and recursive reduction pipeline.
//!
//! Flow: input text is cut into sentence-bounded chunks under a character
//! budget, each chunk goes to the remote model sequentially through the
//! rate gate, summaries are joined in chunk order, and the joined text is
//! reduced again while it stays above the token threshold.

pub mod chunker;
pub mod client;
pub mod error;
pub mod reducer;
pub mod tokens;

pub use chunker::chunk_text;
pub use client::{ChunkOutcome, ChunkSummarizer, ModelClient, RateGate};
pub use error::PipelineError;
pub use reducer::Reducer;
pub use tokens::estimate_tokens;
