//! Reward transaction and contributor aggregate types.

use crate::{ContentHash, Timestamp};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a reward transaction.
///
/// Transitions are monotone: `Pending` may become `Confirmed` or
/// `Failed`; terminal states are never reversed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardStatus {
    Pending,
    Confirmed,
    Failed,
}

impl RewardStatus {
    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: RewardStatus) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Confirmed | Self::Failed),
            Self::Confirmed | Self::Failed => *self == next,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }
}

/// A single reward for a contribution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardTransaction {
    /// Synthetic transaction id, assigned by the ledger on record.
    pub transaction_id: ContentHash,
    pub contributor_id: String,
    /// Reward amount in the native reward unit; never negative.
    pub amount: f64,
    pub reason: String,
    /// The knowledge entry this reward is tied to.
    pub knowledge_hash: ContentHash,
    pub status: RewardStatus,
    pub timestamp: Timestamp,
}

/// Per-contributor running totals, derived solely from folding reward
/// transactions — replaying the transaction stream reproduces it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributorProfile {
    pub contributor_id: String,
    pub total_rewards: f64,
    pub contribution_count: u64,
}
