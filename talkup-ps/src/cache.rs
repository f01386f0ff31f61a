//! Content cache
//!
//! Owns the per-category FIFO queues: one topic queue and three grammar
//! queues keyed by difficulty. Items are appended to the tail and consumed
//! from the head, never reordered; no item is served twice.
//!
//! On a miss the cache requests a fresh batch from the generation provider
//! and falls back to the static corpus when generation yields nothing.
//! Every mutation ends with a write-through snapshot save; a save failure
//! is logged and the in-memory state stays authoritative.
//!
//! Locks are never held across a network or disk await, so interleavings
//! can only reorder which batch lands or which item pops next.

use crate::corpus::FallbackCorpus;
use crate::generation::{Category, GenerationClient};
use crate::snapshot::SnapshotStore;
use std::collections::VecDeque;
use std::sync::Arc;
use talkup_common::types::{
    CacheSnapshot, ClearSummary, Difficulty, GrammarQueues, PracticeItem,
};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// Topic batch requested on a miss
pub const TOPIC_BATCH_SIZE: usize = 20;
/// Grammar batch requested on a miss or a replenishment sweep
pub const GRAMMAR_BATCH_SIZE: usize = 40;
/// Corpus sentences used when grammar generation fails
const GRAMMAR_FALLBACK_FILL: usize = 20;

/// Per-difficulty grammar queues
#[derive(Default)]
struct GrammarBank {
    basic: VecDeque<PracticeItem>,
    intermediate: VecDeque<PracticeItem>,
    advanced: VecDeque<PracticeItem>,
}

impl GrammarBank {
    fn queue(&self, difficulty: Difficulty) -> &VecDeque<PracticeItem> {
        match difficulty {
            Difficulty::Basic => &self.basic,
            Difficulty::Intermediate => &self.intermediate,
            Difficulty::Advanced => &self.advanced,
        }
    }

    fn queue_mut(&mut self, difficulty: Difficulty) -> &mut VecDeque<PracticeItem> {
        match difficulty {
            Difficulty::Basic => &mut self.basic,
            Difficulty::Intermediate => &mut self.intermediate,
            Difficulty::Advanced => &mut self.advanced,
        }
    }

    fn total_len(&self) -> usize {
        self.basic.len() + self.intermediate.len() + self.advanced.len()
    }
}

/// Owned service object holding all practice-content state
pub struct ContentCache {
    topics: RwLock<VecDeque<PracticeItem>>,
    grammar: RwLock<GrammarBank>,
    generator: Arc<GenerationClient>,
    corpus: Arc<FallbackCorpus>,
    store: SnapshotStore,
}

impl ContentCache {
    /// Build the cache, restoring any prior snapshot from the store
    pub async fn restore(
        store: SnapshotStore,
        generator: Arc<GenerationClient>,
        corpus: Arc<FallbackCorpus>,
    ) -> Self {
        let snapshot = store.load().await.unwrap_or_default();

        let bank = GrammarBank {
            basic: snapshot.grammar.basic.into(),
            intermediate: snapshot.grammar.intermediate.into(),
            advanced: snapshot.grammar.advanced.into(),
        };

        Self {
            topics: RwLock::new(snapshot.topics.into()),
            grammar: RwLock::new(bank),
            generator,
            corpus,
            store,
        }
    }

    /// Serve the next discussion topic.
    ///
    /// On an empty queue, requests a batch of [`TOPIC_BATCH_SIZE`] items;
    /// a non-empty result replaces the queue wholesale, an empty result
    /// populates it from the fallback corpus. Returns `None` only when
    /// both the cache and the corpus are empty.
    pub async fn get_topic(&self) -> Option<PracticeItem> {
        let needs_fill = self.topics.read().await.is_empty();

        if needs_fill {
            // Generation happens outside the lock
            let batch = self
                .generator
                .generate_batch(Category::Topics, TOPIC_BATCH_SIZE, None)
                .await;

            let mut topics = self.topics.write().await;
            if !batch.is_empty() {
                *topics = batch.into();
            } else if topics.is_empty() {
                warn!("Topic generation unavailable, filling from fallback corpus");
                *topics = self.corpus.topics().iter().cloned().collect();
            }
        }

        let item = self.topics.write().await.pop_front();
        self.persist().await;
        item
    }

    /// Serve the next grammar sentence for a difficulty.
    ///
    /// Difficulty validation happens at the API boundary; by the time a
    /// `Difficulty` value exists here it is one of the three fixed keys.
    /// On an empty queue, requests [`GRAMMAR_BATCH_SIZE`] items; on
    /// generation failure fills with the first 20 corpus sentences
    /// (not difficulty filtered).
    pub async fn get_grammar(&self, difficulty: Difficulty) -> Option<PracticeItem> {
        let needs_fill = self.grammar.read().await.queue(difficulty).is_empty();

        if needs_fill {
            let batch = self
                .generator
                .generate_batch(Category::Grammar, GRAMMAR_BATCH_SIZE, Some(difficulty))
                .await;

            let mut bank = self.grammar.write().await;
            let queue = bank.queue_mut(difficulty);
            if !batch.is_empty() {
                *queue = batch.into();
            } else if queue.is_empty() {
                warn!(
                    "Grammar generation unavailable for {}, filling from fallback corpus",
                    difficulty
                );
                *queue = self
                    .corpus
                    .grammar()
                    .iter()
                    .take(GRAMMAR_FALLBACK_FILL)
                    .cloned()
                    .collect();
            }
        }

        let item = self.grammar.write().await.queue_mut(difficulty).pop_front();
        self.persist().await;
        item
    }

    /// Append a replenishment batch to the tail of one grammar queue.
    ///
    /// Appends are strictly additive, so racing with foreground
    /// consumption cannot drop or reorder items.
    pub async fn append_grammar(&self, difficulty: Difficulty, items: Vec<PracticeItem>) {
        if items.is_empty() {
            return;
        }
        let count = items.len();
        {
            let mut bank = self.grammar.write().await;
            bank.queue_mut(difficulty).extend(items);
        }
        info!("Appended {} items to {} grammar queue", count, difficulty);
        self.persist().await;
    }

    /// Current length of one grammar queue
    pub async fn grammar_len(&self, difficulty: Difficulty) -> usize {
        self.grammar.read().await.queue(difficulty).len()
    }

    /// Current length of the topic queue
    pub async fn topic_len(&self) -> usize {
        self.topics.read().await.len()
    }

    /// Empty every queue in one step, returning pre-clear counts
    pub async fn clear(&self) -> ClearSummary {
        let summary = {
            // Lock order: topics before grammar, same as snapshot()
            let mut topics = self.topics.write().await;
            let mut bank = self.grammar.write().await;

            let summary = ClearSummary {
                removed_topics: topics.len(),
                removed_grammar: bank.total_len(),
            };

            topics.clear();
            bank.basic.clear();
            bank.intermediate.clear();
            bank.advanced.clear();

            summary
        };

        info!(
            "Cache cleared: {} topics, {} grammar items removed",
            summary.removed_topics, summary.removed_grammar
        );
        self.persist().await;
        summary
    }

    /// Project the live queues into a persistable snapshot
    pub async fn snapshot(&self) -> CacheSnapshot {
        let topics = self.topics.read().await;
        let bank = self.grammar.read().await;

        CacheSnapshot {
            topics: topics.iter().cloned().collect(),
            grammar: GrammarQueues {
                basic: bank.basic.iter().cloned().collect(),
                intermediate: bank.intermediate.iter().cloned().collect(),
                advanced: bank.advanced.iter().cloned().collect(),
            },
            saved_at: chrono::Utc::now(),
        }
    }

    /// Write-through save; failure is logged, not surfaced
    async fn persist(&self) {
        let snapshot = self.snapshot().await;
        if let Err(e) = self.store.save(&snapshot).await {
            error!("Failed to persist cache snapshot: {}", e);
        }
    }
}
