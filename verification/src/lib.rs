//! Content verification pipeline.
//!
//! The orchestrator fetches a URL, summarizes and analyzes the content,
//! derives a verdict, and commits the result to the ledgers. External
//! collaborators (fetching, summarization, payment) sit behind traits so
//! tests and alternate deployments can swap them.

pub mod analysis;
pub mod error;
pub mod fetch;
pub mod job;
pub mod orchestrator;
pub mod payment;
pub mod policy;
pub mod summarize;

pub use error::VerifyError;
pub use fetch::{ContentFetcher, HttpFetcher};
pub use job::{Job, JobManager, JobState};
pub use orchestrator::{IngestReport, IngestSource, VerificationOrchestrator};
pub use payment::{
    HttpPaymentProvider, PaymentOutcome, PaymentProvider, PaymentRequest, DEFAULT_JOB_PRICE,
};
pub use summarize::{HeuristicSummarizer, Summarizer};
