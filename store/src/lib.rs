//! In-memory ledgers for the attest verification service.
//!
//! Five ledgers (verification cache, knowledge base, reputation,
//! incentives, audit trail) plus [`LedgerStore`], which composes them
//! behind per-ledger async locks. All state is volatile: a restart is a
//! fresh, empty store.

pub mod audit;
pub mod cache;
pub mod error;
pub mod incentive;
pub mod knowledge;
pub mod ledger_store;
pub mod reputation;

pub use audit::AuditTrail;
pub use cache::VerificationCache;
pub use error::StoreError;
pub use incentive::IncentiveLedger;
pub use knowledge::KnowledgeBase;
pub use ledger_store::{LedgerStore, StoreSnapshot};
pub use reputation::ReputationLedger;
