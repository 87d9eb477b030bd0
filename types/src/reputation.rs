//! Reputation types and trust-band classification.

use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// The score assigned to an entity that has never been written.
///
/// Unknown means neutral, not invalid — reads never fail on absence.
pub const NEUTRAL_REPUTATION: f64 = 50.0;

/// Reputation record for a source URL or agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReputationEntry {
    pub entity_id: String,
    /// Trust score in [0, 100].
    pub reputation_score: f64,
    pub contribution_count: u64,
    /// Accuracy percentage in [0, 100].
    pub accuracy_rate: f64,
    pub last_updated: Timestamp,
}

/// Display classification of a reputation score.
///
/// Band boundaries are inclusive on the lower bound: 75.0 is trusted,
/// 50.0 is neutral.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationBand {
    Trusted,
    Neutral,
    LowTrust,
}

impl ReputationBand {
    /// Classify a score into its display band.
    pub fn classify(score: f64) -> Self {
        if score >= 75.0 {
            Self::Trusted
        } else if score >= 50.0 {
            Self::Neutral
        } else {
            Self::LowTrust
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trusted => "trusted",
            Self::Neutral => "neutral",
            Self::LowTrust => "low_trust",
        }
    }
}
