//! RPC error types and their HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    /// Malformed request input → 400.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Missing entity where absence is an error → 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// An external collaborator (fetch, summarize, payment) failed → 502.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Internal invariant violation → 500.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<attest_store::StoreError> for RpcError {
    fn from(e: attest_store::StoreError) -> Self {
        use attest_store::StoreError;
        match e {
            StoreError::Validation(msg) => RpcError::Validation(msg),
            StoreError::NotFound(what) => RpcError::NotFound(what),
            StoreError::Corruption(msg) => RpcError::Internal(msg),
        }
    }
}

impl From<attest_verification::VerifyError> for RpcError {
    fn from(e: attest_verification::VerifyError) -> Self {
        use attest_verification::VerifyError;
        match e {
            VerifyError::Validation(msg) => RpcError::Validation(msg),
            VerifyError::JobNotFound(id) => RpcError::NotFound(format!("job {id}")),
            VerifyError::Upstream { .. } | VerifyError::Summarize(_) | VerifyError::Payment(_) => {
                RpcError::Upstream(error_chain(&e))
            }
            VerifyError::Store(inner) => inner.into(),
        }
    }
}

/// Render an error with its source chain, outermost first.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

impl RpcError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RpcError::Validation(_) => StatusCode::BAD_REQUEST,
            RpcError::NotFound(_) => StatusCode::NOT_FOUND,
            RpcError::Upstream(_) => StatusCode::BAD_GATEWAY,
            RpcError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_store::StoreError;

    #[test]
    fn store_errors_map_to_statuses() {
        let e: RpcError = StoreError::Validation("bad".into()).into();
        assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);
        let e: RpcError = StoreError::NotFound("x".into()).into();
        assert_eq!(e.status_code(), StatusCode::NOT_FOUND);
        let e: RpcError = StoreError::Corruption("x".into()).into();
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn verify_upstream_maps_to_bad_gateway() {
        let e: RpcError = attest_verification::VerifyError::Upstream {
            url: "https://example.org".into(),
            source: "timed out".into(),
        }
        .into();
        assert_eq!(e.status_code(), StatusCode::BAD_GATEWAY);
        assert!(e.to_string().contains("example.org"));
    }

    #[test]
    fn job_not_found_maps_to_404() {
        let e: RpcError = attest_verification::VerifyError::JobNotFound("j1".into()).into();
        assert_eq!(e.status_code(), StatusCode::NOT_FOUND);
    }
}
