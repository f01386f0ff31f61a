//! Background grammar queue replenishment
//!
//! Keeps the three grammar queues topped up without blocking the request
//! path. A sweep runs once after a fixed startup delay and again after
//! every successful grammar consumption. For each difficulty whose queue
//! has fallen below the low watermark, a detached task requests a fresh
//! batch and appends it to the tail on success.
//!
//! Outcomes are never awaited by the caller that triggered a sweep; every
//! failure is logged and dropped. A per-difficulty in-flight flag dedupes
//! overlapping triggers so a burst of consumptions issues at most one
//! provider call per difficulty.

use crate::cache::{ContentCache, GRAMMAR_BATCH_SIZE};
use crate::generation::{Category, GenerationClient};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use talkup_common::types::Difficulty;
use tracing::{debug, info, warn};

/// Queue length below which a top-up is requested
pub const LOW_WATERMARK: usize = 10;
/// Delay before the post-startup sweep
pub const STARTUP_DELAY: Duration = Duration::from_secs(5);

/// Watermark-triggered background top-up of the grammar queues
pub struct ReplenishmentScheduler {
    cache: Arc<ContentCache>,
    generator: Arc<GenerationClient>,
    in_flight: [AtomicBool; 3],
}

impl ReplenishmentScheduler {
    pub fn new(cache: Arc<ContentCache>, generator: Arc<GenerationClient>) -> Arc<Self> {
        Arc::new(Self {
            cache,
            generator,
            in_flight: [AtomicBool::new(false), AtomicBool::new(false), AtomicBool::new(false)],
        })
    }

    /// Schedule the one-time startup sweep after [`STARTUP_DELAY`]
    pub fn spawn_startup_sweep(self: &Arc<Self>) {
        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(STARTUP_DELAY).await;
            info!("Running startup replenishment sweep");
            scheduler.sweep().await;
        });
    }

    /// Fire-and-forget sweep over all difficulties.
    ///
    /// Called after each successful grammar consumption; returns
    /// immediately, the work runs in detached tasks.
    pub fn trigger(self: &Arc<Self>) {
        for difficulty in Difficulty::ALL {
            let scheduler = Arc::clone(self);
            tokio::spawn(async move {
                scheduler.replenish(difficulty).await;
            });
        }
    }

    async fn sweep(&self) {
        for difficulty in Difficulty::ALL {
            self.replenish(difficulty).await;
        }
    }

    /// Top up one grammar queue if it is below the watermark
    async fn replenish(&self, difficulty: Difficulty) {
        if self.cache.grammar_len(difficulty).await >= LOW_WATERMARK {
            return;
        }

        let flag = &self.in_flight[slot(difficulty)];
        if flag.swap(true, Ordering::SeqCst) {
            debug!("Replenishment already in flight for {}", difficulty);
            return;
        }

        let batch = self
            .generator
            .generate_batch(Category::Grammar, GRAMMAR_BATCH_SIZE, Some(difficulty))
            .await;

        if batch.is_empty() {
            warn!("Replenishment for {} produced no items", difficulty);
        } else {
            self.cache.append_grammar(difficulty, batch).await;
        }

        flag.store(false, Ordering::SeqCst);
    }
}

fn slot(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Basic => 0,
        Difficulty::Intermediate => 1,
        Difficulty::Advanced => 2,
    }
}
