//! Summarization seam.
//!
//! Production deployments plug in a model-backed summarizer; the default
//! is a deterministic extractive heuristic so the pipeline works with no
//! external service configured.

use crate::error::VerifyError;
use async_trait::async_trait;

/// Only the leading window of the content is summarized.
pub const SUMMARY_INPUT_LIMIT: usize = 4000;

/// Maximum sentences in a heuristic summary.
const SUMMARY_SENTENCES: usize = 6;

/// Produces a concise, neutral summary of fetched content.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, VerifyError>;
}

/// Extractive summarizer: the first few sentences of the leading window,
/// whitespace-normalized.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicSummarizer;

#[async_trait]
impl Summarizer for HeuristicSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, VerifyError> {
        let mut end = SUMMARY_INPUT_LIMIT.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let window = &text[..end];
        let normalized = window.split_whitespace().collect::<Vec<_>>().join(" ");

        let mut summary = String::new();
        let mut sentences = 0;
        for chunk in normalized.split_inclusive(['.', '!', '?']) {
            summary.push_str(chunk);
            sentences += 1;
            if sentences >= SUMMARY_SENTENCES {
                break;
            }
        }
        Ok(summary.trim().to_string())
    }
}
