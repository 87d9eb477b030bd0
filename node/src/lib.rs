//! attest service node — configuration, logging, and composition.

pub mod config;
pub mod error;
pub mod logging;
pub mod service;

pub use config::ServiceConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use service::Service;
