//! Knowledge base — synthesized, scored entries keyed by content digest.

use crate::reputation::in_score_range;
use crate::StoreError;
use attest_types::{ContentHash, KnowledgeEntry, KnowledgeStats, Timestamp};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct KnowledgeBase {
    entries: HashMap<ContentHash, KnowledgeEntry>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert by `knowledge_hash`.
    ///
    /// New entries get `created_at = updated_at = now`. Re-adding an
    /// existing hash overwrites in place but preserves the original
    /// `created_at` and never regresses `updated_at`.
    pub fn upsert(
        &mut self,
        mut entry: KnowledgeEntry,
        now: Timestamp,
    ) -> Result<KnowledgeEntry, StoreError> {
        if entry.topic.is_empty() {
            return Err(StoreError::Validation("topic must not be empty".into()));
        }
        if entry.sources.is_empty() {
            return Err(StoreError::Validation(
                "sources must contain at least one URL".into(),
            ));
        }
        if !in_score_range(entry.verification_score) {
            return Err(StoreError::Validation(format!(
                "verification_score {} outside [0, 100]",
                entry.verification_score
            )));
        }

        match self.entries.get(&entry.knowledge_hash) {
            Some(existing) => {
                entry.created_at = existing.created_at;
                entry.updated_at = existing.updated_at.max(now);
            }
            None => {
                entry.created_at = now;
                entry.updated_at = now;
            }
        }
        self.entries.insert(entry.knowledge_hash, entry.clone());
        Ok(entry)
    }

    pub fn get(&self, hash: &ContentHash) -> Option<KnowledgeEntry> {
        self.entries.get(hash).cloned()
    }

    /// Case-insensitive substring match against `topic`; at most `limit`
    /// entries. Scanning stops once the limit is reached.
    pub fn query(&self, topic: &str, limit: usize) -> Vec<KnowledgeEntry> {
        let needle = topic.to_lowercase();
        let mut results = Vec::new();
        for entry in self.entries.values() {
            if results.len() >= limit {
                break;
            }
            if entry.topic.to_lowercase().contains(&needle) {
                results.push(entry.clone());
            }
        }
        results
    }

    /// Free-text search over topics plus an aggregate confidence score
    /// (mean verification score of the matches; 0.0 with no matches).
    pub fn search(&self, query: &str, limit: usize) -> (Vec<KnowledgeEntry>, f64) {
        let matches = self.query(query, limit);
        let confidence = if matches.is_empty() {
            0.0
        } else {
            matches.iter().map(|e| e.verification_score).sum::<f64>() / matches.len() as f64
        };
        (matches, confidence)
    }

    /// Hashes of every entry scoring strictly above `min_score`.
    ///
    /// The result is an unordered set — membership is meaningful, the
    /// order is map iteration order and must not be relied on.
    pub fn cross_references(&self, min_score: f64) -> Vec<ContentHash> {
        self.entries
            .values()
            .filter(|e| e.verification_score > min_score)
            .map(|e| e.knowledge_hash)
            .collect()
    }

    /// Aggregate statistics over the current snapshot. Never divides by
    /// zero: the empty base averages 0.0 and has no `last_updated`.
    pub fn stats(&self) -> KnowledgeStats {
        let total_entries = self.entries.len();
        let average_verification_score = if total_entries == 0 {
            0.0
        } else {
            self.entries
                .values()
                .map(|e| e.verification_score)
                .sum::<f64>()
                / total_entries as f64
        };
        KnowledgeStats {
            total_entries,
            average_verification_score,
            total_sources: self.entries.values().map(|e| e.sources.len()).sum(),
            last_updated: self.entries.values().map(|e| e.updated_at).max(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
