//! Reputation ledger — entity id to trust score.
//!
//! Reads never fail: an entity that was never written scores the neutral
//! 50.0. Writes are unconditional overwrites (no blending or decay).

use crate::StoreError;
use attest_types::{ReputationEntry, Timestamp, NEUTRAL_REPUTATION};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ReputationLedger {
    entries: HashMap<String, ReputationEntry>,
    /// First-write order, used as the stable tie-break for the leaderboard.
    insertion_order: Vec<String>,
}

impl ReputationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score for an entity; 50.0 ("neutral") when absent.
    pub fn score(&self, entity_id: &str) -> f64 {
        self.entries
            .get(entity_id)
            .map(|e| e.reputation_score)
            .unwrap_or(NEUTRAL_REPUTATION)
    }

    /// Full record for an entity, if one was ever written.
    pub fn get(&self, entity_id: &str) -> Option<ReputationEntry> {
        self.entries.get(entity_id).cloned()
    }

    /// Overwrite the entity's reputation. Scores outside [0, 100] are
    /// rejected before any mutation.
    pub fn update(&mut self, mut entry: ReputationEntry, now: Timestamp) -> Result<(), StoreError> {
        if entry.entity_id.is_empty() {
            return Err(StoreError::Validation("entity_id must not be empty".into()));
        }
        if !in_score_range(entry.reputation_score) {
            return Err(StoreError::Validation(format!(
                "reputation_score {} outside [0, 100]",
                entry.reputation_score
            )));
        }
        if !in_score_range(entry.accuracy_rate) {
            return Err(StoreError::Validation(format!(
                "accuracy_rate {} outside [0, 100]",
                entry.accuracy_rate
            )));
        }
        entry.last_updated = now;
        if !self.entries.contains_key(&entry.entity_id) {
            self.insertion_order.push(entry.entity_id.clone());
        }
        self.entries.insert(entry.entity_id.clone(), entry);
        Ok(())
    }

    /// Top entities by score, descending; ties broken by insertion order
    /// (stable sort) so results are deterministic for a given ledger state.
    pub fn leaderboard(&self, limit: usize) -> Vec<ReputationEntry> {
        let mut ranked: Vec<ReputationEntry> = self
            .insertion_order
            .iter()
            .filter_map(|id| self.entries.get(id).cloned())
            .collect();
        ranked.sort_by(|a, b| {
            b.reputation_score
                .partial_cmp(&a.reputation_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(limit);
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mean score over written entries; 0.0 when the ledger is empty.
    pub fn average_score(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.entries.values().map(|e| e.reputation_score).sum();
        sum / self.entries.len() as f64
    }
}

pub(crate) fn in_score_range(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, score: f64) -> ReputationEntry {
        ReputationEntry {
            entity_id: id.to_string(),
            reputation_score: score,
            contribution_count: 0,
            accuracy_rate: 0.0,
            last_updated: Timestamp::EPOCH,
        }
    }

    #[test]
    fn absent_entity_scores_neutral() {
        let ledger = ReputationLedger::new();
        assert_eq!(ledger.score("never-written"), 50.0);
        assert!(ledger.get("never-written").is_none());
    }

    #[test]
    fn update_overwrites_unconditionally() {
        let mut ledger = ReputationLedger::new();
        ledger.update(entry("a", 80.0), Timestamp::new(1)).unwrap();
        ledger.update(entry("a", 20.0), Timestamp::new(2)).unwrap();
        assert_eq!(ledger.score("a"), 20.0);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("a").unwrap().last_updated, Timestamp::new(2));
    }

    #[test]
    fn out_of_range_score_rejected_without_mutation() {
        let mut ledger = ReputationLedger::new();
        let result = ledger.update(entry("a", 100.1), Timestamp::EPOCH);
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(ledger.is_empty());

        let result = ledger.update(entry("a", f64::NAN), Timestamp::EPOCH);
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(ledger.is_empty());
    }

    #[test]
    fn leaderboard_ties_broken_by_insertion_order() {
        let mut ledger = ReputationLedger::new();
        ledger.update(entry("A", 90.0), Timestamp::EPOCH).unwrap();
        ledger.update(entry("B", 90.0), Timestamp::EPOCH).unwrap();
        ledger.update(entry("C", 70.0), Timestamp::EPOCH).unwrap();

        let top = ledger.leaderboard(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].entity_id, "A");
        assert_eq!(top[1].entity_id, "B");
    }

    #[test]
    fn leaderboard_reflects_latest_scores() {
        let mut ledger = ReputationLedger::new();
        ledger.update(entry("A", 10.0), Timestamp::EPOCH).unwrap();
        ledger.update(entry("B", 50.0), Timestamp::EPOCH).unwrap();
        ledger.update(entry("A", 99.0), Timestamp::EPOCH).unwrap();

        let top = ledger.leaderboard(10);
        assert_eq!(top[0].entity_id, "A");
        assert_eq!(top[0].reputation_score, 99.0);
    }

    #[test]
    fn average_score_empty_is_zero() {
        let ledger = ReputationLedger::new();
        assert_eq!(ledger.average_score(), 0.0);
    }
}
