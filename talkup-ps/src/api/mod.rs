//! REST API implementation for the practice service
//!
//! Route layer only: validation and formatting live in the handlers, all
//! content decisions live in the cache/scoring modules.

pub mod handlers;

use crate::cache::ContentCache;
use crate::corpus::FallbackCorpus;
use crate::replenish::ReplenishmentScheduler;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppContext {
    /// Content cache (topics + grammar queues)
    pub cache: Arc<ContentCache>,
    /// Background grammar replenishment
    pub scheduler: Arc<ReplenishmentScheduler>,
    /// Static datasets (interview questions served directly from here)
    pub corpus: Arc<FallbackCorpus>,
    /// Round-robin cursor over the interview dataset
    pub interview_cursor: Arc<AtomicUsize>,
}

/// Create the API router
///
/// CORS is permissive: the practice client is a browser app served from
/// a different origin.
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest(
            "/api/practice",
            Router::new()
                .route("/questions/topic", get(handlers::get_topic))
                .route("/questions/grammar", get(handlers::get_grammar))
                .route("/questions/interview", get(handlers::get_interview))
                .route("/submit", post(handlers::submit))
                .route("/cache/clear", post(handlers::clear_cache)),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
