//! The composed store: five ledgers behind independent async locks.
//!
//! Each ledger has its own `RwLock`, so readers of one ledger never wait
//! on writers of another. Multi-ledger operations acquire one lock at a
//! time and in a fixed order (primary ledger, then audit); no lock is
//! ever held across an external call.

use crate::audit::AuditTrail;
use crate::cache::VerificationCache;
use crate::incentive::IncentiveLedger;
use crate::knowledge::KnowledgeBase;
use crate::reputation::ReputationLedger;
use crate::StoreError;
use attest_crypto::ContentHasher;
use attest_types::audit::actions;
use attest_types::{
    AuditEntry, ContentHash, ContributorProfile, KnowledgeEntry, KnowledgeStats,
    ReputationEntry, RewardStatus, RewardTransaction, SequencedAuditEntry, Timestamp,
    VerificationResult,
};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Point-in-time operational snapshot, served by the health endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct StoreSnapshot {
    pub cached_verifications: usize,
    pub knowledge_entries: usize,
    pub average_verification_score: f64,
    pub reputation_entries: usize,
    pub average_reputation: f64,
    pub reward_transactions: usize,
    pub contributors: usize,
    pub total_rewards_distributed: f64,
    pub audit_entries: usize,
}

pub struct LedgerStore {
    cache: RwLock<VerificationCache>,
    knowledge: RwLock<KnowledgeBase>,
    reputation: RwLock<ReputationLedger>,
    incentive: RwLock<IncentiveLedger>,
    audit: RwLock<AuditTrail>,
    hasher: Arc<dyn ContentHasher>,
    /// Agent identity stamped on every audit entry this store writes.
    agent_id: String,
    /// Disambiguates transaction ids minted within the same second.
    tx_counter: AtomicU64,
}

impl LedgerStore {
    pub fn new(hasher: Arc<dyn ContentHasher>, agent_id: impl Into<String>) -> Self {
        Self {
            cache: RwLock::new(VerificationCache::new()),
            knowledge: RwLock::new(KnowledgeBase::new()),
            reputation: RwLock::new(ReputationLedger::new()),
            incentive: RwLock::new(IncentiveLedger::new()),
            audit: RwLock::new(AuditTrail::new()),
            hasher,
            agent_id: agent_id.into(),
            tx_counter: AtomicU64::new(0),
        }
    }

    // ── verification cache ──────────────────────────────────────────────

    pub async fn cached_verification(&self, url: &str) -> Option<VerificationResult> {
        self.cache.read().await.get(url)
    }

    pub async fn cached_urls(&self) -> Vec<String> {
        self.cache.read().await.urls()
    }

    /// Commit a completed verification: cache it, then audit it.
    pub async fn record_verification(
        &self,
        result: VerificationResult,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        if result.url.is_empty() {
            return Err(StoreError::Validation("url must not be empty".into()));
        }
        let content_hash = result.content_hash;
        let url = result.url.clone();
        self.cache.write().await.insert(result);
        let sequence = self
            .audit
            .write()
            .await
            .append(AuditEntry {
                timestamp: now,
                action: actions::VERIFICATION_COMPLETED.to_string(),
                agent_id: self.agent_id.clone(),
                data_hash: content_hash,
                anchor: None,
            });
        tracing::debug!(%url, sequence, "verification recorded");
        Ok(())
    }

    // ── knowledge base ──────────────────────────────────────────────────

    /// Upsert a knowledge entry, then audit it.
    pub async fn add_knowledge(
        &self,
        entry: KnowledgeEntry,
        now: Timestamp,
    ) -> Result<KnowledgeEntry, StoreError> {
        let stored = self.knowledge.write().await.upsert(entry, now)?;
        let sequence = self
            .audit
            .write()
            .await
            .append(AuditEntry {
                timestamp: now,
                action: actions::KNOWLEDGE_ADDED.to_string(),
                agent_id: self.agent_id.clone(),
                data_hash: stored.knowledge_hash,
                anchor: None,
            });
        tracing::debug!(topic = %stored.topic, sequence, "knowledge entry stored");
        Ok(stored)
    }

    pub async fn knowledge(&self, hash: &ContentHash) -> Option<KnowledgeEntry> {
        self.knowledge.read().await.get(hash)
    }

    pub async fn query_knowledge(&self, topic: &str, limit: usize) -> Vec<KnowledgeEntry> {
        self.knowledge.read().await.query(topic, limit)
    }

    pub async fn search_knowledge(
        &self,
        query: &str,
        limit: usize,
    ) -> (Vec<KnowledgeEntry>, f64) {
        self.knowledge.read().await.search(query, limit)
    }

    pub async fn knowledge_stats(&self) -> KnowledgeStats {
        self.knowledge.read().await.stats()
    }

    pub async fn cross_references(&self, min_score: f64) -> Vec<ContentHash> {
        self.knowledge.read().await.cross_references(min_score)
    }

    // ── reputation ──────────────────────────────────────────────────────

    pub async fn reputation_score(&self, entity_id: &str) -> f64 {
        self.reputation.read().await.score(entity_id)
    }

    pub async fn reputation(&self, entity_id: &str) -> Option<ReputationEntry> {
        self.reputation.read().await.get(entity_id)
    }

    /// Overwrite an entity's reputation, then audit the update.
    pub async fn update_reputation(
        &self,
        entry: ReputationEntry,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let entity_id = entry.entity_id.clone();
        let score = entry.reputation_score;
        self.reputation.write().await.update(entry, now)?;
        let data_hash = self
            .hasher
            .hash_str(&format!("{entity_id}:{score}"));
        self.audit.write().await.append(AuditEntry {
            timestamp: now,
            action: actions::REPUTATION_UPDATED.to_string(),
            agent_id: self.agent_id.clone(),
            data_hash,
            anchor: None,
        });
        tracing::debug!(%entity_id, score, "reputation updated");
        Ok(())
    }

    pub async fn leaderboard(&self, limit: usize) -> Vec<ReputationEntry> {
        self.reputation.read().await.leaderboard(limit)
    }

    /// Contributions attributed to an entity, derived from the audit trail.
    pub async fn contribution_count(&self, entity_id: &str) -> usize {
        self.audit.read().await.count_referencing(entity_id)
    }

    // ── incentives ──────────────────────────────────────────────────────

    /// Mint and record a pending reward, then audit it.
    ///
    /// The append and the contributor fold happen under a single incentive
    /// lock acquisition; a concurrent reader sees either both or neither.
    pub async fn distribute_reward(
        &self,
        contributor_id: &str,
        amount: f64,
        reason: &str,
        knowledge_hash: ContentHash,
        now: Timestamp,
    ) -> Result<RewardTransaction, StoreError> {
        let tx = RewardTransaction {
            transaction_id: self.mint_transaction_id(contributor_id, now),
            contributor_id: contributor_id.to_string(),
            amount,
            reason: reason.to_string(),
            knowledge_hash,
            status: RewardStatus::Pending,
            timestamp: now,
        };
        self.incentive.write().await.record(tx.clone())?;
        self.audit.write().await.append(AuditEntry {
            timestamp: now,
            action: actions::REWARD_DISTRIBUTED.to_string(),
            agent_id: self.agent_id.clone(),
            data_hash: tx.transaction_id,
            anchor: None,
        });
        tracing::info!(
            contributor = %contributor_id,
            amount,
            tx = %tx.transaction_id,
            "reward distributed"
        );
        Ok(tx)
    }

    pub async fn confirm_reward(
        &self,
        transaction_id: &ContentHash,
    ) -> Result<RewardTransaction, StoreError> {
        self.incentive
            .write()
            .await
            .transition(transaction_id, RewardStatus::Confirmed)
    }

    pub async fn fail_reward(
        &self,
        transaction_id: &ContentHash,
    ) -> Result<RewardTransaction, StoreError> {
        self.incentive
            .write()
            .await
            .transition(transaction_id, RewardStatus::Failed)
    }

    pub async fn reward_transaction(
        &self,
        transaction_id: &ContentHash,
    ) -> Option<RewardTransaction> {
        self.incentive.read().await.transaction(transaction_id)
    }

    pub async fn recent_rewards(&self, limit: usize) -> Vec<RewardTransaction> {
        self.incentive.read().await.transactions(limit)
    }

    pub async fn contributor(&self, contributor_id: &str) -> Option<ContributorProfile> {
        self.incentive.read().await.contributor(contributor_id)
    }

    pub async fn top_contributors(&self, limit: usize) -> Vec<ContributorProfile> {
        self.incentive.read().await.top_contributors(limit)
    }

    // ── audit trail ─────────────────────────────────────────────────────

    /// Audit a successfully ingested source, keyed by the caller-supplied
    /// content hash.
    pub async fn record_ingestion(&self, data_hash: ContentHash, now: Timestamp) {
        let sequence = self.audit.write().await.append(AuditEntry {
            timestamp: now,
            action: actions::DATA_INGESTED.to_string(),
            agent_id: self.agent_id.clone(),
            data_hash,
            anchor: None,
        });
        tracing::debug!(sequence, "ingestion recorded");
    }

    pub async fn audit_page(&self, offset: usize, limit: usize) -> Vec<SequencedAuditEntry> {
        self.audit.read().await.page(offset, limit)
    }

    pub async fn audit_filter(&self, action: &str, limit: usize) -> Vec<SequencedAuditEntry> {
        self.audit.read().await.filter_by_action(action, limit)
    }

    pub async fn audit_len(&self) -> usize {
        self.audit.read().await.len()
    }

    // ── operational ─────────────────────────────────────────────────────

    pub async fn snapshot(&self) -> StoreSnapshot {
        let knowledge_stats = self.knowledge.read().await.stats();
        let (reputation_entries, average_reputation) = {
            let rep = self.reputation.read().await;
            (rep.len(), rep.average_score())
        };
        let (reward_transactions, contributors, total_rewards_distributed) = {
            let inc = self.incentive.read().await;
            (inc.len(), inc.contributor_count(), inc.total_distributed())
        };
        StoreSnapshot {
            cached_verifications: self.cache.read().await.len(),
            knowledge_entries: knowledge_stats.total_entries,
            average_verification_score: knowledge_stats.average_verification_score,
            reputation_entries,
            average_reputation,
            reward_transactions,
            contributors,
            total_rewards_distributed,
            audit_entries: self.audit.read().await.len(),
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Deterministic inputs plus a process-local counter keep ids unique
    /// even when many rewards are minted within the same second.
    fn mint_transaction_id(&self, contributor_id: &str, now: Timestamp) -> ContentHash {
        let n = self.tx_counter.fetch_add(1, Ordering::Relaxed);
        self.hasher
            .hash_str(&format!("reward:{contributor_id}:{}:{n}", now.as_secs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_crypto::Sha256Hasher;

    fn store() -> Arc<LedgerStore> {
        Arc::new(LedgerStore::new(Arc::new(Sha256Hasher), "test-agent"))
    }

    fn knowledge_entry(seed: u8, topic: &str, score: f64) -> KnowledgeEntry {
        KnowledgeEntry {
            knowledge_hash: ContentHash::new([seed; 32]),
            topic: topic.to_string(),
            summary: "s".to_string(),
            sources: vec!["https://example.org".to_string()],
            verification_score: score,
            created_at: Timestamp::EPOCH,
            updated_at: Timestamp::EPOCH,
            on_chain_tx: None,
        }
    }

    #[tokio::test]
    async fn add_knowledge_writes_audit_entry() {
        let store = store();
        store
            .add_knowledge(knowledge_entry(1, "rust", 80.0), Timestamp::new(5))
            .await
            .unwrap();

        assert_eq!(store.audit_len().await, 1);
        let page = store.audit_page(0, 10).await;
        assert_eq!(page[0].entry.action, actions::KNOWLEDGE_ADDED);
        assert_eq!(page[0].entry.agent_id, "test-agent");
        assert_eq!(page[0].entry.data_hash, ContentHash::new([1; 32]));
    }

    #[tokio::test]
    async fn rejected_knowledge_leaves_no_audit_trace() {
        let store = store();
        let mut bad = knowledge_entry(1, "rust", 80.0);
        bad.sources.clear();
        assert!(store.add_knowledge(bad, Timestamp::EPOCH).await.is_err());
        assert_eq!(store.audit_len().await, 0);
        assert_eq!(store.knowledge_stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn reward_mints_unique_ids_and_folds_totals() {
        let store = store();
        let now = Timestamp::new(42);
        let a = store
            .distribute_reward("alice", 10.0, "contribution", ContentHash::ZERO, now)
            .await
            .unwrap();
        let b = store
            .distribute_reward("alice", 10.0, "contribution", ContentHash::ZERO, now)
            .await
            .unwrap();

        assert_ne!(a.transaction_id, b.transaction_id);
        let profile = store.contributor("alice").await.unwrap();
        assert_eq!(profile.total_rewards, 20.0);
        assert_eq!(profile.contribution_count, 2);
        assert_eq!(store.audit_filter(actions::REWARD_DISTRIBUTED, 10).await.len(), 2);
    }

    #[tokio::test]
    async fn negative_reward_rejected_atomically() {
        let store = store();
        let result = store
            .distribute_reward("alice", -5.0, "bad", ContentHash::ZERO, Timestamp::EPOCH)
            .await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(store.contributor("alice").await.is_none());
        assert_eq!(store.audit_len().await, 0);
    }

    #[tokio::test]
    async fn confirm_then_fail_is_rejected() {
        let store = store();
        let tx = store
            .distribute_reward("alice", 1.0, "r", ContentHash::ZERO, Timestamp::EPOCH)
            .await
            .unwrap();
        store.confirm_reward(&tx.transaction_id).await.unwrap();
        let result = store.fail_reward(&tx.transaction_id).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(
            store
                .reward_transaction(&tx.transaction_id)
                .await
                .unwrap()
                .status,
            RewardStatus::Confirmed
        );
    }

    #[tokio::test]
    async fn concurrent_rewards_lose_nothing() {
        let store = store();
        let mut handles = Vec::new();
        for i in 0..100u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .distribute_reward(
                        "alice",
                        1.0,
                        "concurrent",
                        ContentHash::ZERO,
                        Timestamp::new(u64::from(i)),
                    )
                    .await
                    .unwrap()
            }));
        }
        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().transaction_id);
        }

        assert_eq!(ids.len(), 100);
        let profile = store.contributor("alice").await.unwrap();
        assert_eq!(profile.total_rewards, 100.0);
        assert_eq!(profile.contribution_count, 100);
        assert_eq!(store.audit_len().await, 100);
    }

    #[tokio::test]
    async fn snapshot_reflects_all_ledgers() {
        let store = store();
        store
            .add_knowledge(knowledge_entry(1, "a", 60.0), Timestamp::new(1))
            .await
            .unwrap();
        store
            .add_knowledge(knowledge_entry(2, "b", 80.0), Timestamp::new(2))
            .await
            .unwrap();
        store
            .update_reputation(
                ReputationEntry {
                    entity_id: "example.org".to_string(),
                    reputation_score: 90.0,
                    contribution_count: 1,
                    accuracy_rate: 100.0,
                    last_updated: Timestamp::EPOCH,
                },
                Timestamp::new(3),
            )
            .await
            .unwrap();
        store
            .distribute_reward("alice", 5.0, "r", ContentHash::ZERO, Timestamp::new(4))
            .await
            .unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.knowledge_entries, 2);
        assert_eq!(snapshot.average_verification_score, 70.0);
        assert_eq!(snapshot.reputation_entries, 1);
        assert_eq!(snapshot.average_reputation, 90.0);
        assert_eq!(snapshot.reward_transactions, 1);
        assert_eq!(snapshot.contributors, 1);
        assert_eq!(snapshot.total_rewards_distributed, 5.0);
        // knowledge_added x2, reputation_updated, reward_distributed
        assert_eq!(snapshot.audit_entries, 4);
    }
}
