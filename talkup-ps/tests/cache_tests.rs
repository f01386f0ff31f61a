//! Content cache behavior with the provider unavailable
//!
//! These tests run fully offline: the generation client has no API key, so
//! every generation attempt is an immediate soft failure and the cache must
//! serve from the fallback corpus.

use std::path::Path;
use std::sync::Arc;
use talkup_common::types::{Difficulty, PracticeItem};
use talkup_ps::cache::ContentCache;
use talkup_ps::corpus::FallbackCorpus;
use talkup_ps::generation::GenerationClient;
use talkup_ps::snapshot::SnapshotStore;

fn offline_generator() -> Arc<GenerationClient> {
    // No API key: generation returns empty without any network attempt
    Arc::new(
        GenerationClient::new(
            "http://127.0.0.1:9".to_string(),
            None,
            "primary".to_string(),
            "secondary".to_string(),
        )
        .unwrap(),
    )
}

async fn offline_cache(data_folder: &Path) -> Arc<ContentCache> {
    let store = SnapshotStore::new(data_folder.join("cache_snapshot.json"));
    let corpus = Arc::new(FallbackCorpus::bundled().unwrap());
    Arc::new(ContentCache::restore(store, offline_generator(), corpus).await)
}

#[tokio::test]
async fn test_topic_miss_falls_back_to_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let cache = offline_cache(dir.path()).await;
    let corpus = FallbackCorpus::bundled().unwrap();

    let item = cache.get_topic().await;
    assert_eq!(item.as_ref(), corpus.topics().first());
}

#[tokio::test]
async fn test_topics_served_fifo_never_twice() {
    let dir = tempfile::tempdir().unwrap();
    let cache = offline_cache(dir.path()).await;
    let corpus = FallbackCorpus::bundled().unwrap();

    let first = cache.get_topic().await.unwrap();
    let second = cache.get_topic().await.unwrap();
    assert_eq!(first, corpus.topics()[0]);
    assert_eq!(second, corpus.topics()[1]);
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_grammar_miss_fills_first_twenty_corpus_sentences() {
    let dir = tempfile::tempdir().unwrap();
    let cache = offline_cache(dir.path()).await;
    let corpus = FallbackCorpus::bundled().unwrap();

    let item = cache.get_grammar(Difficulty::Basic).await;
    assert_eq!(item.as_ref(), corpus.grammar().first());
    // 20 corpus sentences filled, one consumed
    assert_eq!(cache.grammar_len(Difficulty::Basic).await, 19);
}

#[tokio::test]
async fn test_grammar_queues_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let cache = offline_cache(dir.path()).await;

    cache.get_grammar(Difficulty::Basic).await.unwrap();
    assert_eq!(cache.grammar_len(Difficulty::Basic).await, 19);
    assert_eq!(cache.grammar_len(Difficulty::Intermediate).await, 0);
    assert_eq!(cache.grammar_len(Difficulty::Advanced).await, 0);
}

#[tokio::test]
async fn test_append_grammar_is_additive() {
    let dir = tempfile::tempdir().unwrap();
    let cache = offline_cache(dir.path()).await;

    cache
        .append_grammar(
            Difficulty::Advanced,
            vec![
                PracticeItem { id: 100, text: "first appended".into() },
                PracticeItem { id: 101, text: "second appended".into() },
            ],
        )
        .await;
    cache
        .append_grammar(
            Difficulty::Advanced,
            vec![PracticeItem { id: 102, text: "third appended".into() }],
        )
        .await;

    assert_eq!(cache.grammar_len(Difficulty::Advanced).await, 3);
    // Still FIFO: earliest append comes out first
    let head = cache.get_grammar(Difficulty::Advanced).await.unwrap();
    assert_eq!(head.id, 100);
}

#[tokio::test]
async fn test_clear_returns_pre_clear_counts() {
    let dir = tempfile::tempdir().unwrap();
    let cache = offline_cache(dir.path()).await;
    let corpus = FallbackCorpus::bundled().unwrap();

    // Fill both categories, consuming one item from each
    cache.get_topic().await.unwrap();
    cache.get_grammar(Difficulty::Basic).await.unwrap();

    let summary = cache.clear().await;
    assert_eq!(summary.removed_topics, corpus.topics().len() - 1);
    assert_eq!(summary.removed_grammar, 19);

    assert_eq!(cache.topic_len().await, 0);
    for difficulty in Difficulty::ALL {
        assert_eq!(cache.grammar_len(difficulty).await, 0);
    }
}

#[tokio::test]
async fn test_clear_then_get_grammar_refills() {
    let dir = tempfile::tempdir().unwrap();
    let cache = offline_cache(dir.path()).await;
    let corpus = FallbackCorpus::bundled().unwrap();

    cache.get_grammar(Difficulty::Basic).await.unwrap();
    cache.clear().await;

    // The queue was observed empty, so a fresh fill happens; with the
    // provider unavailable that is again the corpus head.
    let item = cache.get_grammar(Difficulty::Basic).await;
    assert_eq!(item.as_ref(), corpus.grammar().first());
    assert_eq!(cache.grammar_len(Difficulty::Basic).await, 19);
}

#[tokio::test]
async fn test_snapshot_round_trip_restores_identical_queues() {
    let dir = tempfile::tempdir().unwrap();

    let cache = offline_cache(dir.path()).await;
    cache.get_topic().await.unwrap();
    cache.get_grammar(Difficulty::Basic).await.unwrap();
    cache
        .append_grammar(
            Difficulty::Advanced,
            vec![PracticeItem { id: 500, text: "appended".into() }],
        )
        .await;
    let before = cache.snapshot().await;

    // Fresh cache instance over the same store
    let restored = offline_cache(dir.path()).await;
    let after = restored.snapshot().await;

    assert_eq!(after.topics, before.topics);
    assert_eq!(after.grammar, before.grammar);
}

#[tokio::test]
async fn test_save_failure_leaves_in_memory_cache_authoritative() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file occupies the path the store needs as its parent
    // directory, so every snapshot save fails
    let blocker = dir.path().join("not-a-directory");
    std::fs::write(&blocker, b"occupied").unwrap();

    let store = SnapshotStore::new(blocker.join("cache_snapshot.json"));
    let corpus = Arc::new(FallbackCorpus::bundled().unwrap());
    let cache = Arc::new(ContentCache::restore(store, offline_generator(), corpus).await);
    let corpus = FallbackCorpus::bundled().unwrap();

    // Serving is unaffected by the failing write-through saves
    let first = cache.get_topic().await.unwrap();
    assert_eq!(first, corpus.topics()[0]);
    let sentence = cache.get_grammar(Difficulty::Basic).await.unwrap();
    assert_eq!(sentence, corpus.grammar()[0]);

    // Subsequent reads see consistent in-memory queue state
    assert_eq!(cache.topic_len().await, corpus.topics().len() - 1);
    assert_eq!(cache.grammar_len(Difficulty::Basic).await, 19);
    let second = cache.get_topic().await.unwrap();
    assert_eq!(second, corpus.topics()[1]);
}

#[tokio::test]
async fn test_missing_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let cache = offline_cache(dir.path()).await;
    assert_eq!(cache.topic_len().await, 0);
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache_snapshot.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let cache = offline_cache(dir.path()).await;
    assert_eq!(cache.topic_len().await, 0);
    for difficulty in Difficulty::ALL {
        assert_eq!(cache.grammar_len(difficulty).await, 0);
    }
}
