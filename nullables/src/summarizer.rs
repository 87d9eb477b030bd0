//! Nullable summarizer — fixed output, no model call.

use async_trait::async_trait;
use attest_verification::{Summarizer, VerifyError};

/// A summarizer that returns a fixed summary for any input.
pub struct NullSummarizer {
    summary: String,
}

impl NullSummarizer {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
        }
    }
}

impl Default for NullSummarizer {
    fn default() -> Self {
        Self::new("canned summary")
    }
}

#[async_trait]
impl Summarizer for NullSummarizer {
    async fn summarize(&self, _text: &str) -> Result<String, VerifyError> {
        Ok(self.summary.clone())
    }
}
