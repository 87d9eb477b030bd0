//! Paid verification jobs.
//!
//! A job walks a one-way state machine:
//! `awaiting_payment → paid → running → completed | failed`.
//! Payment settlement and the verification work happen on a spawned
//! task; callers poll the job record for progress.

use crate::error::VerifyError;
use crate::orchestrator::VerificationOrchestrator;
use crate::payment::{PaymentOutcome, PaymentProvider, PaymentRequest};
use attest_crypto::ContentHasher;
use attest_types::{Timestamp, VerificationResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    AwaitingPayment,
    Paid,
    Running,
    Completed,
    Failed,
}

impl JobState {
    /// Legal forward transitions; terminal states never change.
    pub fn can_transition_to(&self, next: JobState) -> bool {
        matches!(
            (self, next),
            (Self::AwaitingPayment, Self::Paid)
                | (Self::AwaitingPayment, Self::Failed)
                | (Self::Paid, Self::Running)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingPayment => "awaiting_payment",
            Self::Paid => "paid",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// The queryable record of one paid verification job.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    pub state: JobState,
    pub url: String,
    pub purchaser_id: String,
    pub payment_id: Option<String>,
    pub result: Option<VerificationResult>,
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub struct JobManager {
    jobs: RwLock<HashMap<String, Job>>,
    orchestrator: Arc<VerificationOrchestrator>,
    payments: Arc<dyn PaymentProvider>,
    hasher: Arc<dyn ContentHasher>,
    job_counter: AtomicU64,
}

impl JobManager {
    pub fn new(
        orchestrator: Arc<VerificationOrchestrator>,
        payments: Arc<dyn PaymentProvider>,
        hasher: Arc<dyn ContentHasher>,
    ) -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            orchestrator,
            payments,
            hasher,
            job_counter: AtomicU64::new(0),
        }
    }

    /// Create a job: request payment, record the job, spawn the worker.
    ///
    /// The payment request happens before the job exists, so a payment
    /// service failure creates nothing.
    pub async fn start_job(
        self: Arc<Self>,
        purchaser_id: &str,
        url: &str,
        now: Timestamp,
    ) -> Result<(Job, PaymentRequest), VerifyError> {
        if purchaser_id.is_empty() {
            return Err(VerifyError::Validation(
                "identifier_from_purchaser must not be empty".into(),
            ));
        }
        if url.trim().is_empty() {
            return Err(VerifyError::Validation("url must not be empty".into()));
        }

        let payment = self.payments.create_payment_request(purchaser_id).await?;

        let job = Job {
            job_id: self.mint_job_id(purchaser_id, now),
            state: JobState::AwaitingPayment,
            url: url.to_string(),
            purchaser_id: purchaser_id.to_string(),
            payment_id: Some(payment.payment_id.clone()),
            result: None,
            error: None,
            created_at: now,
            updated_at: now,
        };
        self.jobs
            .write()
            .await
            .insert(job.job_id.clone(), job.clone());
        tracing::info!(job_id = %job.job_id, %url, "job created, awaiting payment");

        let manager = Arc::clone(&self);
        let job_id = job.job_id.clone();
        tokio::spawn(async move {
            manager.run_job(&job_id).await;
        });

        Ok((job, payment))
    }

    /// Job record by id. Absence is meaningful: unknown ids are an error,
    /// never a default.
    pub async fn status(&self, job_id: &str) -> Result<Job, VerifyError> {
        self.jobs
            .read()
            .await
            .get(job_id)
            .cloned()
            .ok_or_else(|| VerifyError::JobNotFound(job_id.to_string()))
    }

    async fn run_job(&self, job_id: &str) {
        let (payment_id, url) = match self.jobs.read().await.get(job_id) {
            Some(job) => (job.payment_id.clone(), job.url.clone()),
            None => return,
        };

        let outcome = match payment_id {
            Some(id) => self.payments.check_payment(&id).await,
            None => Ok(PaymentOutcome::Declined),
        };
        match outcome {
            Ok(PaymentOutcome::Confirmed) => {
                self.transition(job_id, JobState::Paid, |_| {}).await;
            }
            Ok(PaymentOutcome::Declined) => {
                self.transition(job_id, JobState::Failed, |job| {
                    job.error = Some("payment declined".to_string());
                })
                .await;
                return;
            }
            Err(e) => {
                tracing::warn!(%job_id, error = %e, "payment check failed");
                self.transition(job_id, JobState::Failed, |job| {
                    job.error = Some(e.to_string());
                })
                .await;
                return;
            }
        }

        self.transition(job_id, JobState::Running, |_| {}).await;
        match self.orchestrator.verify(&url, Timestamp::now()).await {
            Ok(result) => {
                self.transition(job_id, JobState::Completed, |job| {
                    job.result = Some(result);
                })
                .await;
                tracing::info!(%job_id, "job completed");
            }
            Err(e) => {
                tracing::warn!(%job_id, error = %e, "job failed");
                self.transition(job_id, JobState::Failed, |job| {
                    job.error = Some(e.to_string());
                })
                .await;
            }
        }
    }

    /// Apply a legal state transition; illegal ones are ignored so a
    /// terminal job can never be reopened by a late worker.
    async fn transition(&self, job_id: &str, next: JobState, apply: impl FnOnce(&mut Job)) {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(job_id) {
            if job.state.can_transition_to(next) {
                job.state = next;
                job.updated_at = Timestamp::now();
                apply(job);
            }
        }
    }

    fn mint_job_id(&self, purchaser_id: &str, now: Timestamp) -> String {
        let n = self.job_counter.fetch_add(1, Ordering::Relaxed);
        let digest = self
            .hasher
            .hash_str(&format!("job:{purchaser_id}:{}:{n}", now.as_secs()));
        digest.to_hex()[..16].to_string()
    }
}
