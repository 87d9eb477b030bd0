//! Verification cache — completed verification results keyed by URL.
//!
//! Reads hand out clones. A caller can never observe or mutate the
//! stored value through a returned snapshot.

use attest_types::VerificationResult;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct VerificationCache {
    results: HashMap<String, VerificationResult>,
}

impl VerificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<VerificationResult> {
        self.results.get(url).cloned()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.results.contains_key(url)
    }

    /// Insert or overwrite the result for its URL.
    pub fn insert(&mut self, result: VerificationResult) {
        self.results.insert(result.url.clone(), result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Every cached URL, in no particular order.
    pub fn urls(&self) -> Vec<String> {
        self.results.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_types::{BiasAnalysis, ContentHash, Timestamp, VerificationStatus};

    fn result(url: &str, score: f64) -> VerificationResult {
        VerificationResult {
            url: url.to_string(),
            summary: "a summary".to_string(),
            reliability_score: score,
            bias_level: 0,
            verification_status: VerificationStatus::Verified,
            content_hash: ContentHash::new([7; 32]),
            bias_analysis: BiasAnalysis::default(),
            cross_references: Vec::new(),
            source_reputation: 50.0,
            timestamp: Timestamp::EPOCH,
        }
    }

    #[test]
    fn get_returns_a_snapshot() {
        let mut cache = VerificationCache::new();
        cache.insert(result("https://example.org", 80.0));

        let mut snapshot = cache.get("https://example.org").unwrap();
        snapshot.reliability_score = 1.0;
        assert_eq!(
            cache.get("https://example.org").unwrap().reliability_score,
            80.0
        );
    }

    #[test]
    fn insert_overwrites_by_url() {
        let mut cache = VerificationCache::new();
        cache.insert(result("https://example.org", 60.0));
        cache.insert(result("https://example.org", 90.0));
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get("https://example.org").unwrap().reliability_score,
            90.0
        );
    }

    #[test]
    fn miss_is_none() {
        let cache = VerificationCache::new();
        assert!(cache.get("https://missing.example").is_none());
        assert!(!cache.contains("https://missing.example"));
    }
}
