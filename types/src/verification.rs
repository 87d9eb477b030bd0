//! Verification verdict types.

use crate::{ContentHash, Timestamp};
use serde::{Deserialize, Serialize};

/// Outcome classification of a verification run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Reliability and bias both within the trusted policy bounds.
    Verified,
    /// Outside the policy bounds; a human should take a look.
    NeedsReview,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::NeedsReview => "needs_review",
        }
    }
}

/// Bias signals extracted from fetched content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BiasAnalysis {
    /// The loaded-language markers that were found in the content.
    pub markers_found: Vec<String>,
    /// Count of distinct markers found (equals `bias_level` on the result).
    pub marker_count: u32,
}

/// The complete verdict for one URL.
///
/// Instances handed to callers are snapshots — mutating one never touches
/// the cached copy inside the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub url: String,
    pub summary: String,
    /// Reliability in [0, 100].
    pub reliability_score: f64,
    /// Count of bias markers found (>= 0).
    pub bias_level: u32,
    pub verification_status: VerificationStatus,
    /// Digest of the fetched content; reproducible for identical input.
    pub content_hash: ContentHash,
    pub bias_analysis: BiasAnalysis,
    /// Knowledge hashes judged relevant by score threshold.
    ///
    /// This is an unordered set: membership is meaningful, position is not.
    pub cross_references: Vec<ContentHash>,
    /// Source reputation in [0, 100]; 50.0 when the URL is unknown.
    pub source_reputation: f64,
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&VerificationStatus::NeedsReview).unwrap();
        assert_eq!(json, "\"needs_review\"");
        assert_eq!(VerificationStatus::NeedsReview.as_str(), "needs_review");
    }
}
