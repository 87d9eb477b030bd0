//! Nullable content fetcher — canned responses, no network.

use async_trait::async_trait;
use attest_verification::{ContentFetcher, VerifyError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A fetcher that serves pre-configured responses per URL.
///
/// URLs without a configured response fail as an upstream error, so
/// tests can exercise both paths without touching the network.
#[derive(Default)]
pub struct NullFetcher {
    responses: HashMap<String, String>,
    fetch_count: AtomicUsize,
}

impl NullFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the response for a URL.
    pub fn respond(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), body.into());
        self
    }

    /// How many fetches have been attempted.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ContentFetcher for NullFetcher {
    async fn fetch(&self, url: &str) -> Result<String, VerifyError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| VerifyError::Upstream {
                url: url.to_string(),
                source: "no canned response for url".into(),
            })
    }
}
