//! HTTP API for the attest verification service.
//!
//! Provides endpoints for:
//! - Content verification (`/api/v1/verify`)
//! - Knowledge base queries and additions
//! - Reputation reads, updates, and the leaderboard
//! - Reward distribution and contributor rankings
//! - The append-only audit trail
//! - Paid verification jobs (`/start_job`, `/status`)
//! - Operational health

pub mod error;
pub mod handlers;
pub mod pagination;
pub mod server;

pub use error::RpcError;
pub use server::{build_router, serve, AppState};
