//! Nullable collaborators for deterministic testing.
//!
//! All external dependencies (clock, content fetching, summarization,
//! payment settlement) are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod fetch;
pub mod payment;
pub mod summarizer;

pub use clock::NullClock;
pub use fetch::NullFetcher;
pub use payment::NullPaymentProvider;
pub use summarizer::NullSummarizer;
