//! Append-only, time-ordered log of system actions.
//!
//! Every mutating component writes here. Entries receive strictly
//! increasing sequence numbers on append and are never edited or removed;
//! sequence order equals the causal order of the actions that produced
//! the entries.

use attest_types::{AuditEntry, SequencedAuditEntry};

/// The audit trail. Grows for the process lifetime; volatile.
#[derive(Debug, Default)]
pub struct AuditTrail {
    entries: Vec<SequencedAuditEntry>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, assigning it the next sequence number. O(1).
    pub fn append(&mut self, entry: AuditEntry) -> u64 {
        let sequence = self.entries.len() as u64;
        self.entries.push(SequencedAuditEntry { sequence, entry });
        sequence
    }

    /// Entries `[offset, offset + limit)` in append order.
    ///
    /// Out-of-range offsets yield an empty slice, never an error.
    pub fn page(&self, offset: usize, limit: usize) -> Vec<SequencedAuditEntry> {
        if offset >= self.entries.len() {
            return Vec::new();
        }
        let end = offset.saturating_add(limit).min(self.entries.len());
        self.entries[offset..end].to_vec()
    }

    /// The most recent `limit` entries matching `action`, returned
    /// oldest-first within that window.
    pub fn filter_by_action(&self, action: &str, limit: usize) -> Vec<SequencedAuditEntry> {
        let matching: Vec<&SequencedAuditEntry> = self
            .entries
            .iter()
            .filter(|e| e.entry.action == action)
            .collect();
        let start = matching.len().saturating_sub(limit);
        matching[start..].iter().map(|e| (*e).clone()).collect()
    }

    /// Count of entries that reference `needle` in their agent id, action,
    /// or data hash. Used to derive contribution counts for display.
    pub fn count_referencing(&self, needle: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                e.entry.agent_id == needle
                    || e.entry.action.contains(needle)
                    || e.entry.data_hash.to_hex() == needle
            })
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
