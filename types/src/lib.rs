//! Fundamental types for the attest verification ledger.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: content digests, timestamps, and the entity records held by
//! the five ledgers.

pub mod audit;
pub mod hash;
pub mod knowledge;
pub mod reputation;
pub mod reward;
pub mod time;
pub mod verification;

pub use audit::{AuditEntry, SequencedAuditEntry};
pub use hash::{ContentHash, ParseHashError};
pub use knowledge::{KnowledgeEntry, KnowledgeStats};
pub use reputation::{ReputationBand, ReputationEntry, NEUTRAL_REPUTATION};
pub use reward::{ContributorProfile, RewardStatus, RewardTransaction};
pub use time::Timestamp;
pub use verification::{BiasAnalysis, VerificationResult, VerificationStatus};
