use attest_store::StoreError;
use thiserror::Error;

/// Boxed cause from an external collaborator.
pub type ExternalError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum VerifyError {
    /// Malformed input, rejected before any work happens.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The content source could not be fetched. The original cause is
    /// preserved for logging; handlers map this to an upstream failure.
    #[error("failed to fetch {url}")]
    Upstream {
        url: String,
        #[source]
        source: ExternalError,
    },

    /// The summarizer collaborator failed.
    #[error("summarization failed")]
    Summarize(#[source] ExternalError),

    /// The payment provider failed or declined.
    #[error("payment provider error")]
    Payment(#[source] ExternalError),

    /// A ledger operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No job with the given id. Absence is meaningful for job lookups.
    #[error("job not found: {0}")]
    JobNotFound(String),
}
