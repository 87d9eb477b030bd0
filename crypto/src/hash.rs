//! SHA-256 content hashing.

use attest_types::ContentHash;
use sha2::{Digest, Sha256};

/// Compute a 256-bit SHA-256 digest of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash fetched content to produce its identity `ContentHash`.
pub fn hash_content(content: &[u8]) -> ContentHash {
    ContentHash::new(sha256(content))
}
