//! HTTP request handlers.
//!
//! Handlers stay thin: parse and validate the wire shape, call into the
//! store or the verification pipeline, shape the response. All policy
//! lives below this layer.

use crate::error::RpcError;
use crate::pagination::{
    LimitParam, TrailParams, DEFAULT_FILTER_LIMIT, DEFAULT_QUERY_LIMIT,
};
use crate::server::AppState;
use attest_types::{
    ContentHash, KnowledgeEntry, KnowledgeStats, ReputationBand, ReputationEntry,
    SequencedAuditEntry, Timestamp, VerificationResult,
};
use attest_verification::{IngestReport, IngestSource, Job};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

// ── Data sourcing ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngestRequest {
    pub sources: Vec<IngestSource>,
}

pub async fn ingest_source(
    State(state): State<AppState>,
    Json(req): Json<IngestRequest>,
) -> Json<IngestReport> {
    let report = state
        .orchestrator
        .ingest(&req.sources, Timestamp::now())
        .await;
    Json(report)
}

// ── Verification ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub url: String,
}

pub async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerificationResult>, RpcError> {
    let result = state
        .orchestrator
        .verify(&req.url, Timestamp::now())
        .await?;
    Ok(Json(result))
}

// ── Knowledge base ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddKnowledgeRequest {
    pub knowledge_hash: String,
    pub topic: String,
    pub summary: String,
    pub sources: Vec<String>,
    pub verification_score: f64,
    #[serde(default)]
    pub on_chain_tx: Option<String>,
}

#[derive(Serialize)]
pub struct AddKnowledgeResponse {
    pub status: &'static str,
    pub knowledge_hash: String,
    pub topic: String,
    pub message: &'static str,
}

pub async fn add_knowledge(
    State(state): State<AppState>,
    Json(req): Json<AddKnowledgeRequest>,
) -> Result<Json<AddKnowledgeResponse>, RpcError> {
    let knowledge_hash = parse_hash(&req.knowledge_hash)?;
    let now = Timestamp::now();
    let stored = state
        .store
        .add_knowledge(
            KnowledgeEntry {
                knowledge_hash,
                topic: req.topic,
                summary: req.summary,
                sources: req.sources,
                verification_score: req.verification_score,
                created_at: now,
                updated_at: now,
                on_chain_tx: req.on_chain_tx,
            },
            now,
        )
        .await?;
    Ok(Json(AddKnowledgeResponse {
        status: "success",
        knowledge_hash: stored.knowledge_hash.to_hex(),
        topic: stored.topic,
        message: "Knowledge entry added to base",
    }))
}

#[derive(Deserialize)]
pub struct TopicQuery {
    pub topic: String,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct TopicQueryResponse {
    pub topic: String,
    pub results: Vec<KnowledgeEntry>,
    pub count: usize,
}

pub async fn query_knowledge(
    State(state): State<AppState>,
    Query(params): Query<TopicQuery>,
) -> Result<Json<TopicQueryResponse>, RpcError> {
    let limit = LimitParam {
        limit: params.limit,
    }
    .effective(DEFAULT_QUERY_LIMIT);
    let results = state.store.query_knowledge(&params.topic, limit).await;
    Ok(Json(TopicQueryResponse {
        count: results.len(),
        topic: params.topic,
        results,
    }))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<KnowledgeEntry>,
    pub total_matches: usize,
    pub confidence_score: f64,
}

pub async fn search_knowledge(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, RpcError> {
    let limit = LimitParam {
        limit: params.limit,
    }
    .effective(DEFAULT_QUERY_LIMIT);
    let (results, confidence_score) = state.store.search_knowledge(&params.q, limit).await;
    Ok(Json(SearchResponse {
        query: params.q,
        total_matches: results.len(),
        results,
        confidence_score,
    }))
}

pub async fn knowledge_stats(State(state): State<AppState>) -> Json<KnowledgeStats> {
    Json(state.store.knowledge_stats().await)
}

// ── Reputation ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ReputationResponse {
    pub entity_id: String,
    pub reputation_score: f64,
    pub status: &'static str,
    pub contributions: usize,
}

pub async fn get_reputation(
    State(state): State<AppState>,
    Path(entity_id): Path<String>,
) -> Result<Json<ReputationResponse>, RpcError> {
    let score = state.store.reputation_score(&entity_id).await;
    let contributions = state.store.contribution_count(&entity_id).await;
    Ok(Json(ReputationResponse {
        status: ReputationBand::classify(score).as_str(),
        entity_id,
        reputation_score: score,
        contributions,
    }))
}

#[derive(Deserialize)]
pub struct UpdateReputationRequest {
    pub entity_id: String,
    pub reputation_score: f64,
    #[serde(default)]
    pub contributions: u64,
    #[serde(default)]
    pub accuracy_rate: f64,
}

#[derive(Serialize)]
pub struct UpdateReputationResponse {
    pub status: &'static str,
    pub entity_id: String,
    pub reputation_score: f64,
}

pub async fn update_reputation(
    State(state): State<AppState>,
    Json(req): Json<UpdateReputationRequest>,
) -> Result<Json<UpdateReputationResponse>, RpcError> {
    state
        .store
        .update_reputation(
            ReputationEntry {
                entity_id: req.entity_id.clone(),
                reputation_score: req.reputation_score,
                contribution_count: req.contributions,
                accuracy_rate: req.accuracy_rate,
                last_updated: Timestamp::EPOCH,
            },
            Timestamp::now(),
        )
        .await?;
    Ok(Json(UpdateReputationResponse {
        status: "success",
        entity_id: req.entity_id,
        reputation_score: req.reputation_score,
    }))
}

#[derive(Serialize)]
pub struct LeaderboardRow {
    pub entity_id: String,
    pub reputation_score: f64,
}

#[derive(Serialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardRow>,
    pub total_contributors: usize,
}

pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LimitParam>,
) -> Json<LeaderboardResponse> {
    let limit = params.effective(DEFAULT_QUERY_LIMIT);
    let rows = state
        .store
        .leaderboard(limit)
        .await
        .into_iter()
        .map(|e| LeaderboardRow {
            entity_id: e.entity_id,
            reputation_score: e.reputation_score,
        })
        .collect();
    let total_contributors = state.store.snapshot().await.reputation_entries;
    Json(LeaderboardResponse {
        leaderboard: rows,
        total_contributors,
    })
}

// ── Incentives ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RewardRequest {
    pub contributor_id: String,
    pub amount: f64,
    pub reason: String,
    pub knowledge_hash: String,
}

#[derive(Serialize)]
pub struct RewardResponse {
    pub status: &'static str,
    pub contributor_id: String,
    pub amount: f64,
    pub transaction_hash: String,
}

pub async fn distribute_reward(
    State(state): State<AppState>,
    Json(req): Json<RewardRequest>,
) -> Result<Json<RewardResponse>, RpcError> {
    let knowledge_hash = parse_hash(&req.knowledge_hash)?;
    let tx = state
        .store
        .distribute_reward(
            &req.contributor_id,
            req.amount,
            &req.reason,
            knowledge_hash,
            Timestamp::now(),
        )
        .await?;
    Ok(Json(RewardResponse {
        status: tx.status.as_str(),
        contributor_id: tx.contributor_id,
        amount: tx.amount,
        transaction_hash: tx.transaction_id.to_hex(),
    }))
}

#[derive(Serialize)]
pub struct ContributorRow {
    pub contributor_id: String,
    pub total_rewards: f64,
    pub contributions: u64,
}

#[derive(Serialize)]
pub struct ContributorsResponse {
    pub top_contributors: Vec<ContributorRow>,
    pub total_contributors: usize,
}

pub async fn top_contributors(
    State(state): State<AppState>,
    Query(params): Query<LimitParam>,
) -> Json<ContributorsResponse> {
    let limit = params.effective(DEFAULT_QUERY_LIMIT);
    let rows: Vec<ContributorRow> = state
        .store
        .top_contributors(limit)
        .await
        .into_iter()
        .map(|c| ContributorRow {
            contributor_id: c.contributor_id,
            total_rewards: c.total_rewards,
            contributions: c.contribution_count,
        })
        .collect();
    let total_contributors = state.store.snapshot().await.contributors;
    Json(ContributorsResponse {
        top_contributors: rows,
        total_contributors,
    })
}

// ── Audit trail ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AuditTrailResponse {
    pub total_entries: usize,
    pub returned: usize,
    pub offset: usize,
    pub limit: usize,
    pub entries: Vec<SequencedAuditEntry>,
}

pub async fn audit_trail(
    State(state): State<AppState>,
    Query(params): Query<TrailParams>,
) -> Json<AuditTrailResponse> {
    let limit = params.effective_limit();
    let offset = params.offset();
    let entries = state.store.audit_page(offset, limit).await;
    Json(AuditTrailResponse {
        total_entries: state.store.audit_len().await,
        returned: entries.len(),
        offset,
        limit,
        entries,
    })
}

#[derive(Serialize)]
pub struct AuditFilterResponse {
    pub action: String,
    pub count: usize,
    pub entries: Vec<SequencedAuditEntry>,
}

pub async fn audit_by_action(
    State(state): State<AppState>,
    Path(action): Path<String>,
    Query(params): Query<LimitParam>,
) -> Json<AuditFilterResponse> {
    let limit = params.effective(DEFAULT_FILTER_LIMIT);
    let entries = state.store.audit_filter(&action, limit).await;
    Json(AuditFilterResponse {
        action,
        count: entries.len(),
        entries,
    })
}

// ── Jobs ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StartJobRequest {
    pub identifier_from_purchaser: String,
    pub input_data: JobInput,
}

#[derive(Deserialize)]
pub struct JobInput {
    pub url: String,
}

#[derive(Serialize)]
pub struct StartJobResponse {
    pub status: &'static str,
    pub job_id: String,
    pub payment_id: String,
    pub amount: u64,
    pub unit: String,
    pub message: &'static str,
}

pub async fn start_job(
    State(state): State<AppState>,
    Json(req): Json<StartJobRequest>,
) -> Result<Json<StartJobResponse>, RpcError> {
    let (job, payment) = std::sync::Arc::clone(&state.jobs)
        .start_job(
            &req.identifier_from_purchaser,
            &req.input_data.url,
            Timestamp::now(),
        )
        .await?;
    Ok(Json(StartJobResponse {
        status: "success",
        job_id: job.job_id,
        payment_id: payment.payment_id,
        amount: payment.amount,
        unit: payment.unit,
        message: "Job initiated. Check status endpoint for completion.",
    }))
}

#[derive(Deserialize)]
pub struct JobStatusQuery {
    pub job_id: String,
}

pub async fn job_status(
    State(state): State<AppState>,
    Query(params): Query<JobStatusQuery>,
) -> Result<Json<Job>, RpcError> {
    let job = state.jobs.status(&params.job_id).await?;
    Ok(Json(job))
}

// ── Operational ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    #[serde(flatten)]
    pub snapshot: attest_store::StoreSnapshot,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "operational",
        service: "attest",
        snapshot: state.store.snapshot().await,
    })
}

#[derive(Serialize)]
pub struct VerificationHistoryResponse {
    pub count: usize,
    pub cached_urls: Vec<String>,
}

pub async fn verification_history(
    State(state): State<AppState>,
) -> Json<VerificationHistoryResponse> {
    let cached_urls = state.store.cached_urls().await;
    Json(VerificationHistoryResponse {
        count: cached_urls.len(),
        cached_urls,
    })
}

fn parse_hash(hex: &str) -> Result<ContentHash, RpcError> {
    ContentHash::from_hex(hex)
        .map_err(|e| RpcError::Validation(format!("knowledge_hash: {e}")))
}
