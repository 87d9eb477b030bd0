//! Nullable payment provider — scripted settlement, no payment service.

use async_trait::async_trait;
use attest_verification::{PaymentOutcome, PaymentProvider, PaymentRequest, VerifyError};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A payment provider with a scripted outcome.
///
/// Every created request settles with the configured outcome; request
/// ids are deterministic (`null-payment-0`, `null-payment-1`, …).
pub struct NullPaymentProvider {
    outcome: PaymentOutcome,
    request_count: AtomicUsize,
}

impl NullPaymentProvider {
    pub fn confirming() -> Self {
        Self {
            outcome: PaymentOutcome::Confirmed,
            request_count: AtomicUsize::new(0),
        }
    }

    pub fn declining() -> Self {
        Self {
            outcome: PaymentOutcome::Declined,
            request_count: AtomicUsize::new(0),
        }
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PaymentProvider for NullPaymentProvider {
    async fn create_payment_request(
        &self,
        _purchaser_id: &str,
    ) -> Result<PaymentRequest, VerifyError> {
        let n = self.request_count.fetch_add(1, Ordering::Relaxed);
        Ok(PaymentRequest {
            payment_id: format!("null-payment-{n}"),
            amount: 0,
            unit: "lovelace".to_string(),
        })
    }

    async fn check_payment(&self, _payment_id: &str) -> Result<PaymentOutcome, VerifyError> {
        Ok(self.outcome)
    }
}
