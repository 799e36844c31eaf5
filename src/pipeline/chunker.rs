//! Sentence-bounded text chunking.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::unwrap_used)]
static SENTENCES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").unwrap());

/// Split a text into sentence-aligned chunks no longer than `budget` characters.
///
/// Sentences are runs of non-terminator characters followed by one or more of
/// `.`, `!`, `?`. A text without any terminator (including the empty string)
/// is treated as a single sentence and returned as one chunk, trimmed.
///
/// The budget counts characters, not tokens. A chunk is closed before a
/// sentence that would push it past the budget; a single sentence longer than
/// the budget is emitted alone, unshortened. Chunks keep source order.
#[must_use]
pub fn chunk_text(text: &str, budget: usize) -> Vec<String> {
    let sentences: Vec<&str> = SENTENCES.find_iter(text).map(|m| m.as_str()).collect();
    if sentences.is_empty() {
        return vec![text.trim().to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in sentences {
        if current.chars().count() + sentence.chars().count() <= budget {
            current.push_str(sentence);
        } else {
            let closed = current.trim();
            if !closed.is_empty() {
                chunks.push(closed.to_string());
            }
            current = sentence.to_string();
        }
    }

    let last = current.trim();
    if !last.is_empty() {
        chunks.push(last.to_string());
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_budget_one_sentence_per_chunk() {
        let chunks = chunk_text("A. B. C.", 3);
        assert_eq!(chunks, vec!["A.", "B.", "C."]);
    }

    #[test]
    fn test_large_budget_single_chunk() {
        let chunks = chunk_text("A. B. C.", 8);
        assert_eq!(chunks, vec!["A. B. C."]);
    }

    #[test]
    fn test_empty_input_yields_one_empty_chunk() {
        assert_eq!(chunk_text("", 100), vec![String::new()]);
    }

    #[test]
    fn test_no_terminator_is_one_chunk() {
        let chunks = chunk_text("no terminator anywhere in this text", 10);
        assert_eq!(chunks, vec!["no terminator anywhere in this text"]);
    }

    #[test]
    fn test_oversized_sentence_emitted_alone() {
        let chunks = chunk_text("This single sentence is far too long. Ok.", 10);
        assert_eq!(chunks, vec!["This single sentence is far too long.", "Ok."]);
    }

    #[test]
    fn test_budget_respected_except_oversized_sentences() {
        let text = "One two three. Four five. Six seven eight nine! Ten?";
        let budget = 20;
        for chunk in chunk_text(text, budget) {
            let within = chunk.chars().count() <= budget;
            let single_sentence = SENTENCES.find_iter(&chunk).count() <= 1;
            assert!(within || single_sentence, "chunk broke the budget: {chunk:?}");
        }
    }

    #[test]
    fn test_no_sentence_dropped() {
        let text = "Alpha beta. Gamma delta! Epsilon zeta? Eta theta.";
        let joined = chunk_text(text, 15).join(" ");
        for part in ["Alpha beta.", "Gamma delta!", "Epsilon zeta?", "Eta theta."] {
            assert!(joined.contains(part), "missing sentence: {part}");
        }
    }
}
