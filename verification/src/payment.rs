//! Payment settlement seam for paid verification jobs.
//!
//! Settlement itself is external; this module only defines the interface
//! and an HTTP client for a payment service that implements it.

use crate::error::VerifyError;
use async_trait::async_trait;
use serde::Deserialize;

/// A created payment request, identified by the settlement layer.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentRequest {
    pub payment_id: String,
    pub amount: u64,
    pub unit: String,
}

/// Final settlement outcome for a payment request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentOutcome {
    Confirmed,
    Declined,
}

/// Creates payment requests and reports their settlement outcome.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_payment_request(
        &self,
        purchaser_id: &str,
    ) -> Result<PaymentRequest, VerifyError>;

    async fn check_payment(&self, payment_id: &str) -> Result<PaymentOutcome, VerifyError>;
}

/// Default price per job, in the settlement layer's smallest unit.
pub const DEFAULT_JOB_PRICE: u64 = 10_000_000;

/// HTTP client for an external payment service.
pub struct HttpPaymentProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    agent_id: String,
}

#[derive(Deserialize)]
struct PaymentData {
    #[serde(rename = "blockchainIdentifier")]
    blockchain_identifier: Option<String>,
    status: Option<String>,
}

#[derive(Deserialize)]
struct PaymentEnvelope {
    data: PaymentData,
}

impl HttpPaymentProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        agent_id: impl Into<String>,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            base_url: base_url.into(),
            api_key: api_key.into(),
            agent_id: agent_id.into(),
        })
    }

    fn payment_error(e: reqwest::Error) -> VerifyError {
        VerifyError::Payment(Box::new(e))
    }
}

#[async_trait]
impl PaymentProvider for HttpPaymentProvider {
    async fn create_payment_request(
        &self,
        purchaser_id: &str,
    ) -> Result<PaymentRequest, VerifyError> {
        let envelope: PaymentEnvelope = self
            .client
            .post(format!("{}/payment", self.base_url))
            .header("token", &self.api_key)
            .json(&serde_json::json!({
                "agentIdentifier": self.agent_id,
                "identifierFromPurchaser": purchaser_id,
                "amounts": [{ "amount": DEFAULT_JOB_PRICE.to_string(), "unit": "lovelace" }],
            }))
            .send()
            .await
            .map_err(Self::payment_error)?
            .error_for_status()
            .map_err(Self::payment_error)?
            .json()
            .await
            .map_err(Self::payment_error)?;

        let payment_id = envelope.data.blockchain_identifier.ok_or_else(|| {
            VerifyError::Payment("payment service returned no identifier".into())
        })?;
        Ok(PaymentRequest {
            payment_id,
            amount: DEFAULT_JOB_PRICE,
            unit: "lovelace".to_string(),
        })
    }

    async fn check_payment(&self, payment_id: &str) -> Result<PaymentOutcome, VerifyError> {
        let envelope: PaymentEnvelope = self
            .client
            .get(format!("{}/payment/{payment_id}", self.base_url))
            .header("token", &self.api_key)
            .send()
            .await
            .map_err(Self::payment_error)?
            .error_for_status()
            .map_err(Self::payment_error)?
            .json()
            .await
            .map_err(Self::payment_error)?;

        match envelope.data.status.as_deref() {
            Some("completed") | Some("confirmed") => Ok(PaymentOutcome::Confirmed),
            _ => Ok(PaymentOutcome::Declined),
        }
    }
}
