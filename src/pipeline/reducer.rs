//! Bounded recursive reduction of long text into one summary.

use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::pipeline::chunker::chunk_text;
use crate::pipeline::client::{ChunkOutcome, ChunkSummarizer};
use crate::pipeline::tokens::estimate_tokens;

/// Drives the chunk, summarize, join cycle until the result fits the
/// token threshold.
///
/// A naive recursive formulation has no termination guarantee when the
/// model fails to shrink its input, so this runs as an explicit loop with a
/// pass limit and a shrink check, returning the current best-effort result
/// when the token count stops strictly decreasing.
pub struct Reducer<S> {
    summarizer: S,
    config: PipelineConfig,
}

impl<S: ChunkSummarizer> Reducer<S> {
    /// Create a reducer over the given summarizer.
    pub fn new(summarizer: S, config: PipelineConfig) -> Self {
        Self { summarizer, config }
    }

    /// Reduce a text to a summary no longer than the configured threshold,
    /// best effort.
    ///
    /// Chunks of each pass are summarized strictly in order, one at a time;
    /// results are joined with single spaces, preserving chunk order. At
    /// least one pass always runs, even for short input.
    pub async fn reduce(&self, text: &str) -> String {
        let mut working = text.to_string();
        let mut previous_tokens = estimate_tokens(&working);

        for pass in 1..=self.config.max_passes {
            let chunks = chunk_text(&working, self.config.chunk_budget);
            debug!(pass, chunks = chunks.len(), "starting reduction pass");

            let mut summaries = Vec::with_capacity(chunks.len());
            for chunk in &chunks {
                let outcome = self.summarizer.summarize_chunk(chunk).await;
                if let ChunkOutcome::Failed(reason) = &outcome {
                    warn!(pass, "chunk degraded to empty summary: {reason}");
                }
                summaries.push(outcome.into_text());
            }

            let joined = summaries.join(" ");
            let tokens = estimate_tokens(&joined);
            debug!(pass, tokens, "reduction pass complete");

            if tokens <= self.config.token_threshold {
                return joined;
            }
            // Liveness guard: a pass that does not shrink the text would
            // loop forever, so return what we have.
            if tokens >= previous_tokens {
                warn!(
                    pass,
                    tokens, previous_tokens, "reduction stopped shrinking, returning as-is"
                );
                return joined;
            }

            previous_tokens = tokens;
            working = joined;
        }

        warn!(
            max_passes = self.config.max_passes,
            "pass limit reached, returning best-effort summary"
        );
        working
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;

    fn config(budget: usize, threshold: usize) -> PipelineConfig {
        PipelineConfig {
            chunk_budget: budget,
            token_threshold: threshold,
            max_output_length: 200,
            request_delay: Duration::ZERO,
            max_passes: 4,
        }
    }

    /// Keeps the first word of each chunk, counting calls.
    struct FirstWord {
        calls: AtomicUsize,
    }

    impl FirstWord {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ChunkSummarizer for FirstWord {
        async fn summarize_chunk(&self, chunk: &str) -> ChunkOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let first = chunk.split_whitespace().next().unwrap_or("");
            ChunkOutcome::Summarized(first.to_string())
        }
    }

    /// Returns every chunk unchanged.
    struct Echo {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChunkSummarizer for Echo {
        async fn summarize_chunk(&self, chunk: &str) -> ChunkOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ChunkOutcome::Summarized(chunk.to_string())
        }
    }

    /// Fails on every chunk.
    struct AlwaysFails;

    #[async_trait]
    impl ChunkSummarizer for AlwaysFails {
        async fn summarize_chunk(&self, _chunk: &str) -> ChunkOutcome {
            ChunkOutcome::Failed("remote unavailable".to_string())
        }
    }

    #[tokio::test]
    async fn test_single_pass_when_under_threshold() {
        let reducer = Reducer::new(FirstWord::new(), config(10, 2));
        let summary = reducer.reduce("aa. bb. cc. dd.").await;
        // Two chunks ("aa. bb." and "cc. dd."), each reduced to its first word.
        assert_eq!(summary, "aa. cc.");
        assert_eq!(reducer.summarizer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_shrinking_output_triggers_one_extra_pass() {
        let reducer = Reducer::new(FirstWord::new(), config(10, 1));
        let summary = reducer.reduce("aa. bb. cc. dd.").await;
        // Pass 1 joins to "aa. cc." (2 tokens, still above threshold);
        // pass 2 reduces that single chunk to "aa.".
        assert_eq!(summary, "aa.");
        assert_eq!(reducer.summarizer.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_shrinking_output_terminates() {
        let reducer = Reducer::new(
            Echo {
                calls: AtomicUsize::new(0),
            },
            config(10, 1),
        );
        let summary = reducer.reduce("aa. bb. cc. dd.").await;
        // Echoed chunks rejoin to the input; the shrink guard stops after
        // one pass instead of looping.
        assert_eq!(summary, "aa. bb. cc. dd.");
        assert_eq!(reducer.summarizer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_chunks_join_as_empty_text() {
        let reducer = Reducer::new(AlwaysFails, config(10, 5));
        let summary = reducer.reduce("aa. bb. cc. dd.").await;
        // Two failed chunks collapse to empty strings joined by one space.
        assert_eq!(summary, " ");
    }

    #[tokio::test]
    async fn test_chunk_order_is_preserved() {
        struct Upper;

        #[async_trait]
        impl ChunkSummarizer for Upper {
            async fn summarize_chunk(&self, chunk: &str) -> ChunkOutcome {
                ChunkOutcome::Summarized(chunk.to_uppercase())
            }
        }

        let reducer = Reducer::new(Upper, config(10, 450));
        let summary = reducer.reduce("aa. bb. cc. dd.").await;
        assert_eq!(summary, "AA. BB. CC. DD.");
    }
}
