//! Verification orchestrator — connects fetching, summarization,
//! analysis, and the ledgers into the end-to-end verify pipeline.
//!
//! Ordering matters: all external calls (fetch, summarize) complete
//! before any ledger is touched, so a failed or cancelled verification
//! leaves no partial state behind.

use crate::analysis::{detect_bias, reliability_score};
use crate::error::VerifyError;
use crate::fetch::ContentFetcher;
use crate::policy::{derive_status, CROSS_REF_MIN_SCORE};
use crate::summarize::Summarizer;
use attest_crypto::ContentHasher;
use attest_store::LedgerStore;
use attest_types::{ContentHash, Timestamp, VerificationResult};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// One source in a batch ingestion request.
#[derive(Clone, Debug, Deserialize)]
pub struct IngestSource {
    /// Source kind; only `"http"` is currently ingestible.
    pub source_type: String,
    /// URL (or address) of the source.
    pub source_address: String,
    /// Caller-supplied digest of the content, hex-encoded.
    pub content_hash: String,
}

/// Outcome of a batch ingestion run.
#[derive(Clone, Debug, Serialize)]
pub struct IngestReport {
    pub sources_processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<String>,
    pub ingestion_id: String,
}

pub struct VerificationOrchestrator {
    store: Arc<LedgerStore>,
    fetcher: Arc<dyn ContentFetcher>,
    summarizer: Arc<dyn Summarizer>,
    hasher: Arc<dyn ContentHasher>,
    /// Disambiguates ingestion ids minted within the same second.
    ingest_counter: AtomicU64,
}

impl VerificationOrchestrator {
    pub fn new(
        store: Arc<LedgerStore>,
        fetcher: Arc<dyn ContentFetcher>,
        summarizer: Arc<dyn Summarizer>,
        hasher: Arc<dyn ContentHasher>,
    ) -> Self {
        Self {
            store,
            fetcher,
            summarizer,
            hasher,
            ingest_counter: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &Arc<LedgerStore> {
        &self.store
    }

    /// Run the full verification pipeline for a URL.
    ///
    /// A cache hit returns the stored result unchanged and records
    /// nothing — verifying the same URL twice is idempotent and leaves a
    /// single audit entry.
    pub async fn verify(
        &self,
        url: &str,
        now: Timestamp,
    ) -> Result<VerificationResult, VerifyError> {
        if url.trim().is_empty() {
            return Err(VerifyError::Validation("url must not be empty".into()));
        }

        if let Some(cached) = self.store.cached_verification(url).await {
            tracing::debug!(%url, "verification cache hit");
            return Ok(cached);
        }

        // External work first, with no lock held.
        let text = self.fetcher.fetch(url).await?;
        let summary = self.summarizer.summarize(&text).await?;

        let bias_analysis = detect_bias(&text);
        let score = reliability_score(&text);
        let content_hash = self.hasher.hash(text.as_bytes());
        let status = derive_status(score, bias_analysis.marker_count);

        let cross_references = self.store.cross_references(CROSS_REF_MIN_SCORE).await;
        let source_reputation = self.store.reputation_score(url).await;

        let result = VerificationResult {
            url: url.to_string(),
            summary,
            reliability_score: score,
            bias_level: bias_analysis.marker_count,
            verification_status: status,
            content_hash,
            bias_analysis,
            cross_references,
            source_reputation,
            timestamp: now,
        };

        self.store.record_verification(result.clone(), now).await?;
        tracing::info!(
            %url,
            status = status.as_str(),
            reliability = score,
            "verification completed"
        );
        Ok(result)
    }

    /// Ingest a batch of sources, running the verify pipeline for each
    /// HTTP source.
    ///
    /// Sources are independent: one failure never aborts the batch. Each
    /// successfully verified source leaves a `data_ingested` audit entry
    /// keyed by the caller-supplied content hash.
    pub async fn ingest(&self, sources: &[IngestSource], now: Timestamp) -> IngestReport {
        let mut successful = 0;
        let mut failed = 0;
        let mut errors = Vec::new();

        for source in sources {
            match self.ingest_one(source, now).await {
                Ok(()) => successful += 1,
                Err(e) => {
                    failed += 1;
                    errors.push(format!("{}: {e}", source.source_address));
                }
            }
        }

        let ingestion_id = self.mint_ingestion_id(now);
        tracing::info!(
            sources = sources.len(),
            successful,
            failed,
            %ingestion_id,
            "ingestion batch finished"
        );
        IngestReport {
            sources_processed: sources.len(),
            successful,
            failed,
            errors,
            ingestion_id,
        }
    }

    async fn ingest_one(&self, source: &IngestSource, now: Timestamp) -> Result<(), VerifyError> {
        if source.source_type != "http" {
            return Err(VerifyError::Validation(format!(
                "unsupported source type {:?}",
                source.source_type
            )));
        }
        let data_hash = ContentHash::from_hex(&source.content_hash)
            .map_err(|e| VerifyError::Validation(format!("content_hash: {e}")))?;
        self.verify(&source.source_address, now).await?;
        self.store.record_ingestion(data_hash, now).await;
        Ok(())
    }

    fn mint_ingestion_id(&self, now: Timestamp) -> String {
        let n = self.ingest_counter.fetch_add(1, Ordering::Relaxed);
        let digest = self
            .hasher
            .hash_str(&format!("ingest:{}:{n}", now.as_secs()));
        digest.to_hex()[..16].to_string()
    }
}
