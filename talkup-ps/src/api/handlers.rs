//! HTTP request handlers
//!
//! Implements the practice content and scoring endpoints. Handlers do
//! request validation and response shaping; every content decision is
//! delegated to the cache, scheduler, or scoring engine.

use crate::api::AppContext;
use crate::scoring;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;
use talkup_common::types::{ClearSummary, Difficulty, PracticeItem, ScoreReport};
use talkup_common::Error;
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
pub struct GrammarQuery {
    difficulty: String,
}

/// Body of POST /api/practice/submit; absent fields default so a partial
/// client payload still scores
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitRequest {
    target_text: String,
    transcript: String,
    duration: f64,
    filler_words: Vec<String>,
    repeating_words: Vec<String>,
}

impl Default for SubmitRequest {
    fn default() -> Self {
        Self {
            target_text: String::new(),
            transcript: String::new(),
            duration: 0.0,
            filler_words: Vec::new(),
            repeating_words: Vec::new(),
        }
    }
}

type HandlerError = (StatusCode, Json<StatusResponse>);

fn not_found(what: &str) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(StatusResponse {
            status: format!("no {} available", what),
        }),
    )
}

fn bad_request(error: Error) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(StatusResponse {
            status: format!("error: {}", error),
        }),
    )
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "practice_service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Practice Content Endpoints
// ============================================================================

/// GET /api/practice/questions/topic - Serve the next discussion topic
pub async fn get_topic(
    State(ctx): State<AppContext>,
) -> Result<Json<PracticeItem>, HandlerError> {
    match ctx.cache.get_topic().await {
        Some(item) => Ok(Json(item)),
        None => Err(not_found("topic")),
    }
}

/// GET /api/practice/questions/grammar?difficulty=K - Serve the next
/// grammar sentence for a difficulty
///
/// Unknown difficulty keys are rejected before any generation attempt.
pub async fn get_grammar(
    State(ctx): State<AppContext>,
    Query(query): Query<GrammarQuery>,
) -> Result<Json<PracticeItem>, HandlerError> {
    let difficulty = Difficulty::parse(&query.difficulty).ok_or_else(|| {
        bad_request(Error::InvalidInput(format!(
            "unknown difficulty '{}'",
            query.difficulty
        )))
    })?;

    match ctx.cache.get_grammar(difficulty).await {
        Some(item) => {
            // Fire-and-forget: the response does not wait on replenishment
            ctx.scheduler.trigger();
            Ok(Json(item))
        }
        None => Err(not_found("grammar sentence")),
    }
}

/// GET /api/practice/questions/interview - Serve the next interview
/// question, round-robin over the static dataset
pub async fn get_interview(
    State(ctx): State<AppContext>,
) -> Result<Json<PracticeItem>, HandlerError> {
    let questions = ctx.corpus.interviews();
    if questions.is_empty() {
        return Err(not_found("interview question"));
    }
    let index = ctx.interview_cursor.fetch_add(1, Ordering::Relaxed) % questions.len();
    Ok(Json(questions[index].clone()))
}

// ============================================================================
// Scoring Endpoint
// ============================================================================

/// POST /api/practice/submit - Score a spoken attempt against its target
pub async fn submit(Json(request): Json<SubmitRequest>) -> Json<ScoreReport> {
    let report = scoring::score(
        &request.target_text,
        &request.transcript,
        request.duration,
        &request.filler_words,
        &request.repeating_words,
    );
    info!(
        "Scored attempt: accuracy={} fluency={} wpm={}",
        report.accuracy_score, report.fluency_rating, report.wpm
    );
    Json(report)
}

// ============================================================================
// Cache Management
// ============================================================================

/// POST /api/practice/cache/clear - Empty every content queue
pub async fn clear_cache(State(ctx): State<AppContext>) -> Json<ClearSummary> {
    Json(ctx.cache.clear().await)
}
