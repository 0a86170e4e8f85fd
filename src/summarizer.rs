//! Summary strategies.
//!
//! Neither strategy understands the text: both cut the body down to a
//! budget and append an ellipsis. They sit behind [`Summarizer`] so a
//! model-backed summarizer can replace them without touching the pipeline.

use crate::cli::Truncation;

const ELLIPSIS: &str = "...";

/// Shortens an article body to a budget.
pub trait Summarizer {
    /// Produce a summary of `body` within `max_words` units.
    fn summarize(&self, body: &str, max_words: usize) -> String;
}

/// Keeps the first `max_words` characters, despite the parameter name.
///
/// May cut mid-word or mid-sentence. Text no longer than the budget is kept
/// whole. An ellipsis is appended either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveTruncationSummarizer;

impl Summarizer for NaiveTruncationSummarizer {
    fn summarize(&self, body: &str, max_words: usize) -> String {
        let mut summary: String = body.chars().take(max_words).collect();
        summary.push_str(ELLIPSIS);
        summary
    }
}

/// Keeps the first `max_words` whitespace-separated words, joined by single
/// spaces, followed by an ellipsis.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTruncationSummarizer;

impl Summarizer for WordTruncationSummarizer {
    fn summarize(&self, body: &str, max_words: usize) -> String {
        let mut summary = body
            .split_whitespace()
            .take(max_words)
            .collect::<Vec<_>>()
            .join(" ");
        summary.push_str(ELLIPSIS);
        summary
    }
}

/// The summarizer selected on the command line.
pub fn for_truncation(truncation: Truncation) -> Box<dyn Summarizer> {
    match truncation {
        Truncation::Chars => Box::new(NaiveTruncationSummarizer),
        Truncation::Words => Box::new(WordTruncationSummarizer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_truncation_cuts_characters() {
        let body = "The quick brown fox jumps over the lazy dog";
        assert_eq!(NaiveTruncationSummarizer.summarize(body, 9), "The quick...");
        // mid-word cut is expected
        assert_eq!(NaiveTruncationSummarizer.summarize(body, 12), "The quick br...");
    }

    #[test]
    fn test_naive_truncation_matches_prefix_slice() {
        let body = "a".repeat(100) + &"b".repeat(100);
        let summary = NaiveTruncationSummarizer.summarize(&body, 60);
        assert_eq!(summary, format!("{}...", &body[..60]));
    }

    #[test]
    fn test_naive_truncation_short_text_kept_whole() {
        assert_eq!(NaiveTruncationSummarizer.summarize("Short.", 60), "Short....");
        assert_eq!(NaiveTruncationSummarizer.summarize("", 60), "...");
    }

    #[test]
    fn test_naive_truncation_never_splits_code_points() {
        let body = "भारत में मानसून";
        assert_eq!(NaiveTruncationSummarizer.summarize(body, 4), "भारत...");
    }

    #[test]
    fn test_word_truncation() {
        let body = "The quick  brown\nfox jumps over the lazy dog";
        assert_eq!(WordTruncationSummarizer.summarize(body, 3), "The quick brown...");
        assert_eq!(
            WordTruncationSummarizer.summarize("Two words", 60),
            "Two words..."
        );
    }

    #[test]
    fn test_for_truncation() {
        let body = "one two three";
        assert_eq!(for_truncation(Truncation::Chars).summarize(body, 3), "one...");
        assert_eq!(
            for_truncation(Truncation::Words).summarize(body, 2),
            "one two..."
        );
    }
}
