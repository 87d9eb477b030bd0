//! Audit trail entry types and well-known action names.

use crate::{ContentHash, Timestamp};
use serde::{Deserialize, Serialize};

/// Well-known audit action names.
pub mod actions {
    pub const VERIFICATION_COMPLETED: &str = "verification_completed";
    pub const KNOWLEDGE_ADDED: &str = "knowledge_added";
    pub const REPUTATION_UPDATED: &str = "reputation_updated";
    pub const REWARD_DISTRIBUTED: &str = "reward_distributed";
    pub const DATA_INGESTED: &str = "data_ingested";
}

/// One immutable record of a state-changing action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: Timestamp,
    /// Enum-like action name, see [`actions`].
    pub action: String,
    /// Identifier of the agent that performed the action.
    pub agent_id: String,
    /// Digest of the action's payload.
    pub data_hash: ContentHash,
    /// Optional external anchor (e.g. a block hash), absent until anchored.
    pub anchor: Option<String>,
}

/// An audit entry with its append sequence number.
///
/// Sequence order equals the causal order of the actions that produced
/// the entries; entries are never edited or removed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequencedAuditEntry {
    pub sequence: u64,
    #[serde(flatten)]
    pub entry: AuditEntry,
}
