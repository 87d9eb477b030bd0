//! Knowledge base entry types.

use crate::{ContentHash, Timestamp};
use serde::{Deserialize, Serialize};

/// A synthesized, scored knowledge entry, keyed by its content digest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Content-derived digest uniquely identifying this entry.
    pub knowledge_hash: ContentHash,
    /// Topic / category used for substring queries.
    pub topic: String,
    pub summary: String,
    /// Source URLs; never empty for a valid entry.
    pub sources: Vec<String>,
    /// Aggregate verification score in [0, 100].
    pub verification_score: f64,
    /// Immutable once set; preserved across upserts of the same hash.
    pub created_at: Timestamp,
    /// Monotonically non-decreasing across upserts.
    pub updated_at: Timestamp,
    /// Optional external anchor reference (e.g. an on-chain transaction).
    pub on_chain_tx: Option<String>,
}

/// Aggregate statistics over the current knowledge base snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeStats {
    pub total_entries: usize,
    /// Mean verification score; 0.0 for an empty base.
    pub average_verification_score: f64,
    /// Sum of source-list lengths across entries.
    pub total_sources: usize,
    /// Most recent `updated_at`, absent when the base is empty.
    pub last_updated: Option<Timestamp>,
}
