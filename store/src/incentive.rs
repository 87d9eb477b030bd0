//! Incentive ledger — reward transactions and contributor totals.
//!
//! The contributor map is a pure fold over the transaction list: every
//! recorded reward bumps the contributor's totals in the same mutation,
//! so replaying the transactions always reproduces the map.

use crate::StoreError;
use attest_types::{ContentHash, ContributorProfile, RewardStatus, RewardTransaction};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct IncentiveLedger {
    transactions: Vec<RewardTransaction>,
    contributors: HashMap<String, ContributorProfile>,
    /// First-reward order, the stable tie-break for top_contributors.
    insertion_order: Vec<String>,
}

impl IncentiveLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reward and fold it into the contributor's totals.
    ///
    /// Validation happens before any mutation: a rejected reward leaves
    /// both the transaction list and the contributor map untouched.
    pub fn record(&mut self, tx: RewardTransaction) -> Result<(), StoreError> {
        if tx.contributor_id.is_empty() {
            return Err(StoreError::Validation(
                "contributor_id must not be empty".into(),
            ));
        }
        if !tx.amount.is_finite() || tx.amount < 0.0 {
            return Err(StoreError::Validation(format!(
                "reward amount {} must be non-negative",
                tx.amount
            )));
        }

        let profile = self
            .contributors
            .entry(tx.contributor_id.clone())
            .or_insert_with(|| {
                self.insertion_order.push(tx.contributor_id.clone());
                ContributorProfile {
                    contributor_id: tx.contributor_id.clone(),
                    ..Default::default()
                }
            });
        profile.total_rewards += tx.amount;
        profile.contribution_count += 1;
        self.transactions.push(tx);
        Ok(())
    }

    /// Move a transaction to `next` status. Only monotone transitions are
    /// accepted: pending may confirm or fail, terminal states never change.
    pub fn transition(
        &mut self,
        transaction_id: &ContentHash,
        next: RewardStatus,
    ) -> Result<RewardTransaction, StoreError> {
        let tx = self
            .transactions
            .iter_mut()
            .find(|t| t.transaction_id == *transaction_id)
            .ok_or_else(|| {
                StoreError::NotFound(format!("reward transaction {transaction_id}"))
            })?;
        if !tx.status.can_transition_to(next) {
            return Err(StoreError::Validation(format!(
                "illegal reward transition {} -> {}",
                tx.status.as_str(),
                next.as_str()
            )));
        }
        tx.status = next;
        Ok(tx.clone())
    }

    pub fn transaction(&self, transaction_id: &ContentHash) -> Option<RewardTransaction> {
        self.transactions
            .iter()
            .find(|t| t.transaction_id == *transaction_id)
            .cloned()
    }

    pub fn contributor(&self, contributor_id: &str) -> Option<ContributorProfile> {
        self.contributors.get(contributor_id).cloned()
    }

    /// Top contributors by total rewards, descending; ties broken by
    /// first-reward order (stable sort).
    pub fn top_contributors(&self, limit: usize) -> Vec<ContributorProfile> {
        let mut ranked: Vec<ContributorProfile> = self
            .insertion_order
            .iter()
            .filter_map(|id| self.contributors.get(id).cloned())
            .collect();
        ranked.sort_by(|a, b| {
            b.total_rewards
                .partial_cmp(&a.total_rewards)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(limit);
        ranked
    }

    /// Transactions in record order, most recent last.
    pub fn transactions(&self, limit: usize) -> Vec<RewardTransaction> {
        let start = self.transactions.len().saturating_sub(limit);
        self.transactions[start..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn contributor_count(&self) -> usize {
        self.contributors.len()
    }

    /// Sum of all recorded reward amounts, regardless of status.
    pub fn total_distributed(&self) -> f64 {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}
