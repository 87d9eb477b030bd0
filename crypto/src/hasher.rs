//! Injectable digest seam.
//!
//! Every ledger keys entries by a content digest, but none of them name a
//! concrete algorithm — the digest function is injected at construction
//! time so it can be swapped (e.g. for a different hash, or an on-chain
//! anchoring digest) without touching callers.

use attest_types::ContentHash;

/// A pure, deterministic digest function over opaque payloads.
pub trait ContentHasher: Send + Sync {
    /// Hash a payload to its fixed-length digest. No side effects.
    fn hash(&self, payload: &[u8]) -> ContentHash;

    /// Convenience: hash a UTF-8 string payload.
    fn hash_str(&self, payload: &str) -> ContentHash {
        self.hash(payload.as_bytes())
    }
}

/// The production hasher: SHA-256.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl ContentHasher for Sha256Hasher {
    fn hash(&self, payload: &[u8]) -> ContentHash {
        crate::hash::hash_content(payload)
    }
}
