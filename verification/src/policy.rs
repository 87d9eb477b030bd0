//! Verdict policy. Every status decision in the system routes through
//! these constants so the thresholds live in exactly one place.

use attest_types::VerificationStatus;

/// Minimum reliability score for a `verified` verdict.
pub const MIN_RELIABILITY: f64 = 75.0;

/// Bias marker counts at or above this force `needs_review`.
pub const MAX_BIAS_LEVEL: u32 = 3;

/// Knowledge entries scoring strictly above this participate in
/// cross-referencing.
pub const CROSS_REF_MIN_SCORE: f64 = 70.0;

/// Derive the verdict from the measured signals.
pub fn derive_status(reliability_score: f64, bias_level: u32) -> VerificationStatus {
    if reliability_score >= MIN_RELIABILITY && bias_level < MAX_BIAS_LEVEL {
        VerificationStatus::Verified
    } else {
        VerificationStatus::NeedsReview
    }
}
