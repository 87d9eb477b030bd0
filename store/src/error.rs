use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed or out-of-range input, rejected before any mutation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The entity does not exist and its absence is meaningful here
    /// (reads that default on absence never return this).
    #[error("not found: {0}")]
    NotFound(String),

    /// An internal invariant no longer holds. Fatal to the request.
    #[error("ledger corrupted: {0}")]
    Corruption(String),
}
