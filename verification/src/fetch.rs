//! Content fetching seam.

use crate::error::{ExternalError, VerifyError};
use async_trait::async_trait;
use std::time::Duration;

/// Fetch timeout, matching the upstream sources this service targets.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(12);

/// Retrieves the raw text content behind a URL.
///
/// Implementations must not mutate any ledger state; the orchestrator
/// calls this without holding any lock.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, VerifyError>;
}

/// Production fetcher over HTTP(S).
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, VerifyError> {
        let upstream = |source: ExternalError| VerifyError::Upstream {
            url: url.to_string(),
            source,
        };
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| upstream(Box::new(e)))?;
        let response = response
            .error_for_status()
            .map_err(|e| upstream(Box::new(e)))?;
        response.text().await.map_err(|e| upstream(Box::new(e)))
    }
}
