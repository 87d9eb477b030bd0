//! Axum router and server entry point.

use crate::handlers;
use attest_store::LedgerStore;
use attest_verification::{JobManager, VerificationOrchestrator};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LedgerStore>,
    pub orchestrator: Arc<VerificationOrchestrator>,
    pub jobs: Arc<JobManager>,
}

/// Assemble the full API surface.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/source/ingest", post(handlers::ingest_source))
        .route("/api/v1/verify", post(handlers::verify))
        .route("/api/v1/knowledge-base/add", post(handlers::add_knowledge))
        .route("/api/v1/knowledge-base/query", get(handlers::query_knowledge))
        .route("/api/v1/knowledge-base/search", get(handlers::search_knowledge))
        .route("/api/v1/knowledge-base/stats", get(handlers::knowledge_stats))
        .route("/api/v1/reputation/leaderboard", get(handlers::leaderboard))
        .route("/api/v1/reputation/update", post(handlers::update_reputation))
        .route("/api/v1/reputation/:entity_id", get(handlers::get_reputation))
        .route("/api/v1/incentives/reward", post(handlers::distribute_reward))
        .route("/api/v1/incentives/contributors", get(handlers::top_contributors))
        .route("/api/v1/audit/trail", get(handlers::audit_trail))
        .route("/api/v1/audit/:action", get(handlers::audit_by_action))
        .route("/start_job", post(handlers::start_job))
        .route("/status", get(handlers::job_status))
        .route("/health", get(handlers::health))
        .route("/verification-history", get(handlers::verification_history))
        // The service is consumed by browser dApps; allow any origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "http api listening");
    axum::serve(listener, router).await
}
