//! Content hashing primitives for the attest verification ledger.
//!
//! - **SHA-256** for content identity digests (the same digest the wire
//!   API exposes as lowercase hex)
//! - [`ContentHasher`] — the injectable seam the orchestrator and ledgers
//!   receive instead of a hard-coded algorithm

pub mod hash;
pub mod hasher;

pub use hash::{hash_content, sha256, sha256_multi};
pub use hasher::{ContentHasher, Sha256Hasher};
