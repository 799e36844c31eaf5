//! Approximate token counting.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::unwrap_used)]
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Estimate the token count of a text by splitting on whitespace runs.
///
/// This is a deliberate approximation of model tokenization: the count is
/// the number of `\s+`-delimited segments, so boundary whitespace yields an
/// extra empty segment and the empty string counts as one token. Callers
/// compare these counts against [`crate::config::PipelineConfig::token_threshold`].
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    WHITESPACE.split(text).count()
}
