//! Service composition root.
//!
//! Builds the ledgers, the verification pipeline, and the job manager,
//! and wires them into the HTTP API. Production collaborators are used
//! unless the config opts out (payments default to the auto-confirming
//! development provider).

use crate::{NodeError, ServiceConfig};
use attest_crypto::{ContentHasher, Sha256Hasher};
use attest_nullables::NullPaymentProvider;
use attest_rpc::AppState;
use attest_store::LedgerStore;
use attest_verification::{
    ContentFetcher, HeuristicSummarizer, HttpFetcher, HttpPaymentProvider, JobManager,
    PaymentProvider, VerificationOrchestrator,
};
use std::net::SocketAddr;
use std::sync::Arc;

pub struct Service {
    config: ServiceConfig,
    state: AppState,
}

impl Service {
    /// Compose the full service from configuration.
    pub fn build(config: ServiceConfig) -> Result<Self, NodeError> {
        let hasher: Arc<dyn ContentHasher> = Arc::new(Sha256Hasher);
        let store = Arc::new(LedgerStore::new(Arc::clone(&hasher), &config.agent_id));

        let fetcher: Arc<dyn ContentFetcher> =
            Arc::new(HttpFetcher::new().map_err(|e| NodeError::Client(e.to_string()))?);
        let orchestrator = Arc::new(VerificationOrchestrator::new(
            Arc::clone(&store),
            fetcher,
            Arc::new(HeuristicSummarizer),
            Arc::clone(&hasher),
        ));

        let payments: Arc<dyn PaymentProvider> = if config.enable_payments {
            Arc::new(
                HttpPaymentProvider::new(
                    &config.payment_service_url,
                    &config.payment_api_key,
                    &config.agent_id,
                )
                .map_err(|e| NodeError::Client(e.to_string()))?,
            )
        } else {
            tracing::warn!("payments disabled, jobs will auto-confirm");
            Arc::new(NullPaymentProvider::confirming())
        };
        let jobs = Arc::new(JobManager::new(
            Arc::clone(&orchestrator),
            payments,
            hasher,
        ));

        Ok(Self {
            config,
            state: AppState {
                store,
                orchestrator,
                jobs,
            },
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn bind_addr(&self) -> Result<SocketAddr, NodeError> {
        format!("{}:{}", self.config.api_host, self.config.api_port)
            .parse()
            .map_err(|e| NodeError::Config(format!("invalid api address: {e}")))
    }

    /// Serve the HTTP API until the process is stopped.
    pub async fn run(&self) -> Result<(), NodeError> {
        let addr = self.bind_addr()?;
        tracing::info!(
            agent_id = %self.config.agent_id,
            payments = self.config.enable_payments,
            "starting attest service"
        );
        attest_rpc::serve(addr, self.state.clone()).await?;
        Ok(())
    }
}
