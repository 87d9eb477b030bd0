//! End-to-end tests wiring the ledgers, the verification pipeline, and
//! the job manager together with nullable collaborators.

use attest_crypto::Sha256Hasher;
use attest_nullables::{NullClock, NullFetcher, NullPaymentProvider, NullSummarizer};
use attest_store::LedgerStore;
use attest_types::{
    ContentHash, KnowledgeEntry, ReputationEntry, RewardStatus, Timestamp, VerificationStatus,
};
use attest_verification::{IngestSource, JobManager, JobState, VerificationOrchestrator};
use std::sync::Arc;
use std::time::Duration;

const URL: &str = "https://example.org/article";

fn store() -> Arc<LedgerStore> {
    Arc::new(LedgerStore::new(Arc::new(Sha256Hasher), "test-agent"))
}

fn orchestrator_with(
    store: Arc<LedgerStore>,
    fetcher: Arc<NullFetcher>,
) -> Arc<VerificationOrchestrator> {
    Arc::new(VerificationOrchestrator::new(
        store,
        fetcher,
        Arc::new(NullSummarizer::default()),
        Arc::new(Sha256Hasher),
    ))
}

fn knowledge_entry(seed: u8, topic: &str, score: f64) -> KnowledgeEntry {
    KnowledgeEntry {
        knowledge_hash: ContentHash::new([seed; 32]),
        topic: topic.to_string(),
        summary: "synthesized summary".to_string(),
        sources: vec![URL.to_string()],
        verification_score: score,
        created_at: Timestamp::EPOCH,
        updated_at: Timestamp::EPOCH,
        on_chain_tx: None,
    }
}

#[tokio::test]
async fn full_pipeline_verify_store_reward_audit() {
    let clock = NullClock::new(1_000);
    let store = store();
    let fetcher = Arc::new(NullFetcher::new().respond(URL, "Measured results. ".repeat(400)));
    let orch = orchestrator_with(Arc::clone(&store), fetcher);

    // Verify the source.
    let result = orch.verify(URL, clock.now()).await.unwrap();
    assert_eq!(result.verification_status, VerificationStatus::Verified);
    assert_eq!(result.reliability_score, 90.0);
    assert_eq!(result.summary, "canned summary");

    // Store the synthesized knowledge.
    clock.advance(10);
    let entry = KnowledgeEntry {
        knowledge_hash: result.content_hash,
        topic: "measurements".to_string(),
        summary: result.summary.clone(),
        sources: vec![URL.to_string()],
        verification_score: result.reliability_score,
        created_at: Timestamp::EPOCH,
        updated_at: Timestamp::EPOCH,
        on_chain_tx: None,
    };
    store.add_knowledge(entry, clock.now()).await.unwrap();

    // Reward the contributor and confirm.
    clock.advance(10);
    let tx = store
        .distribute_reward("alice", 25.0, "verified contribution", result.content_hash, clock.now())
        .await
        .unwrap();
    assert_eq!(tx.status, RewardStatus::Pending);
    let confirmed = store.confirm_reward(&tx.transaction_id).await.unwrap();
    assert_eq!(confirmed.status, RewardStatus::Confirmed);

    // Every mutation left an audit entry, in causal order.
    let trail = store.audit_page(0, 10).await;
    assert_eq!(trail.len(), 3);
    assert_eq!(trail[0].entry.action, "verification_completed");
    assert_eq!(trail[1].entry.action, "knowledge_added");
    assert_eq!(trail[2].entry.action, "reward_distributed");

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.cached_verifications, 1);
    assert_eq!(snapshot.knowledge_entries, 1);
    assert_eq!(snapshot.contributors, 1);
    assert_eq!(snapshot.total_rewards_distributed, 25.0);
}

#[tokio::test]
async fn repeated_verification_fetches_once() {
    let store = store();
    let fetcher = Arc::new(NullFetcher::new().respond(URL, "content ".repeat(300)));
    let orch = orchestrator_with(store, Arc::clone(&fetcher));

    let first = orch.verify(URL, Timestamp::new(1)).await.unwrap();
    let second = orch.verify(URL, Timestamp::new(2)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fetcher.fetch_count(), 1);
    assert_eq!(orch.store().audit_len().await, 1);
}

#[tokio::test]
async fn cross_references_track_high_scoring_knowledge() {
    let store = store();
    store.add_knowledge(knowledge_entry(1, "a", 65.0), Timestamp::new(1)).await.unwrap();
    store.add_knowledge(knowledge_entry(2, "b", 80.0), Timestamp::new(1)).await.unwrap();
    store.add_knowledge(knowledge_entry(3, "c", 90.0), Timestamp::new(1)).await.unwrap();

    let fetcher = Arc::new(NullFetcher::new().respond(URL, "short"));
    let orch = orchestrator_with(Arc::clone(&store), fetcher);
    let result = orch.verify(URL, Timestamp::new(2)).await.unwrap();

    let refs: std::collections::HashSet<_> = result.cross_references.into_iter().collect();
    assert_eq!(refs.len(), 2);
    assert!(refs.contains(&ContentHash::new([2; 32])));
    assert!(refs.contains(&ContentHash::new([3; 32])));
}

#[tokio::test]
async fn unknown_sources_score_neutral_until_updated() {
    let store = store();
    assert_eq!(store.reputation_score(URL).await, 50.0);

    store
        .update_reputation(
            ReputationEntry {
                entity_id: URL.to_string(),
                reputation_score: 91.0,
                contribution_count: 0,
                accuracy_rate: 0.0,
                last_updated: Timestamp::EPOCH,
            },
            Timestamp::new(5),
        )
        .await
        .unwrap();
    assert_eq!(store.reputation_score(URL).await, 91.0);

    // The update itself is audited.
    assert_eq!(store.audit_filter("reputation_updated", 10).await.len(), 1);
}

#[tokio::test]
async fn leaderboard_is_deterministic_for_ties() {
    let store = store();
    for id in ["first", "second", "third"] {
        store
            .update_reputation(
                ReputationEntry {
                    entity_id: id.to_string(),
                    reputation_score: 80.0,
                    contribution_count: 0,
                    accuracy_rate: 0.0,
                    last_updated: Timestamp::EPOCH,
                },
                Timestamp::new(1),
            )
            .await
            .unwrap();
    }

    for _ in 0..5 {
        let top = store.leaderboard(3).await;
        let ids: Vec<_> = top.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }
}

async fn wait_terminal(jobs: &JobManager, job_id: &str) -> attest_verification::Job {
    for _ in 0..200 {
        let job = jobs.status(job_id).await.unwrap();
        if matches!(job.state, JobState::Completed | JobState::Failed) {
            return job;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("job never reached a terminal state");
}

#[tokio::test]
async fn paid_job_produces_a_cached_verification() {
    let store = store();
    let fetcher = Arc::new(NullFetcher::new().respond(URL, "content ".repeat(300)));
    let orch = orchestrator_with(Arc::clone(&store), fetcher);
    let jobs = Arc::new(JobManager::new(
        orch,
        Arc::new(NullPaymentProvider::confirming()),
        Arc::new(Sha256Hasher),
    ));

    let (job, payment) = Arc::clone(&jobs)
        .start_job("purchaser-7", URL, Timestamp::new(1))
        .await
        .unwrap();
    assert_eq!(job.state, JobState::AwaitingPayment);
    assert_eq!(payment.payment_id, "null-payment-0");

    let done = wait_terminal(&jobs, &job.job_id).await;
    assert_eq!(done.state, JobState::Completed);
    assert_eq!(done.result.unwrap().url, URL);
    assert!(store.cached_verification(URL).await.is_some());
}

#[tokio::test]
async fn declined_payment_never_verifies() {
    let store = store();
    let fetcher = Arc::new(NullFetcher::new().respond(URL, "content"));
    let orch = orchestrator_with(Arc::clone(&store), Arc::clone(&fetcher));
    let jobs = Arc::new(JobManager::new(
        orch,
        Arc::new(NullPaymentProvider::declining()),
        Arc::new(Sha256Hasher),
    ));

    let (job, _) = Arc::clone(&jobs)
        .start_job("purchaser-7", URL, Timestamp::new(1))
        .await
        .unwrap();
    let done = wait_terminal(&jobs, &job.job_id).await;

    assert_eq!(done.state, JobState::Failed);
    assert_eq!(fetcher.fetch_count(), 0);
    assert!(store.cached_verification(URL).await.is_none());
}

#[tokio::test]
async fn failed_upstream_leaves_ledgers_untouched() {
    let store = store();
    // No canned response configured: the fetch fails.
    let fetcher = Arc::new(NullFetcher::new());
    let orch = orchestrator_with(Arc::clone(&store), fetcher);

    let result = orch.verify(URL, Timestamp::new(1)).await;
    assert!(result.is_err());

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.cached_verifications, 0);
    assert_eq!(snapshot.audit_entries, 0);
}

#[tokio::test]
async fn batch_ingestion_verifies_and_audits_http_sources() {
    let store = store();
    let fetcher = Arc::new(
        NullFetcher::new()
            .respond("https://example.org/a", "content ".repeat(300))
            .respond("https://example.org/b", "content ".repeat(300)),
    );
    let orch = orchestrator_with(Arc::clone(&store), fetcher);

    let sources = vec![
        IngestSource {
            source_type: "http".to_string(),
            source_address: "https://example.org/a".to_string(),
            content_hash: "aa".repeat(32),
        },
        IngestSource {
            source_type: "http".to_string(),
            source_address: "https://example.org/b".to_string(),
            content_hash: "bb".repeat(32),
        },
        IngestSource {
            source_type: "arweave".to_string(),
            source_address: "ar://some-tx".to_string(),
            content_hash: "cc".repeat(32),
        },
    ];
    let report = orch.ingest(&sources, Timestamp::new(1)).await;

    assert_eq!(report.sources_processed, 3);
    assert_eq!(report.successful, 2);
    assert_eq!(report.failed, 1);
    assert!(report.errors[0].contains("ar://some-tx"));

    // Both HTTP sources verified and audited; the unsupported source
    // touched nothing.
    assert_eq!(store.snapshot().await.cached_verifications, 2);
    let ingested = store.audit_filter("data_ingested", 10).await;
    assert_eq!(ingested.len(), 2);
    assert!(ingested
        .iter()
        .any(|e| e.entry.data_hash == ContentHash::new([0xaa; 32])));
}

#[tokio::test]
async fn knowledge_updates_preserve_creation_time() {
    let clock = NullClock::new(100);
    let store = store();

    store
        .add_knowledge(knowledge_entry(9, "rust", 70.0), clock.now())
        .await
        .unwrap();
    clock.advance(500);
    store
        .add_knowledge(knowledge_entry(9, "rust updated", 85.0), clock.now())
        .await
        .unwrap();

    let entry = store.knowledge(&ContentHash::new([9; 32])).await.unwrap();
    assert_eq!(entry.created_at, Timestamp::new(100));
    assert_eq!(entry.updated_at, Timestamp::new(600));
    assert_eq!(entry.topic, "rust updated");
}
