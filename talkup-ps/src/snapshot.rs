//! Cache snapshot persistence
//!
//! Best-effort durability: the whole cache state is written as one JSON
//! document after every mutation, and restored at startup if present.
//! A missing or corrupt snapshot means an empty starting cache, never a
//! startup failure. Writes are last-writer-wins; no atomic rename.

use std::path::PathBuf;
use talkup_common::types::CacheSnapshot;
use talkup_common::{Error, Result};
use tracing::{debug, info, warn};

/// Serializes/restores cache state to a single snapshot document
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Overwrite the snapshot document with the given state.
    ///
    /// Callers log and swallow the error; the in-memory cache stays
    /// authoritative regardless of the outcome here.
    pub async fn save(&self, snapshot: &CacheSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Persistence(format!("create {}: {}", parent.display(), e)))?;
        }

        let json = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| Error::Persistence(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| Error::Persistence(format!("write {}: {}", self.path.display(), e)))?;

        debug!(
            "Saved cache snapshot: {} topics, {} grammar items",
            snapshot.topics.len(),
            snapshot.grammar.total_len()
        );
        Ok(())
    }

    /// Restore the prior snapshot if present and well-formed
    pub async fn load(&self) -> Option<CacheSnapshot> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No cache snapshot at {}, starting empty", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read snapshot {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_slice::<CacheSnapshot>(&bytes) {
            Ok(snapshot) => {
                info!(
                    "Restored cache snapshot: {} topics, {} grammar items (saved {})",
                    snapshot.topics.len(),
                    snapshot.grammar.total_len(),
                    snapshot.saved_at
                );
                Some(snapshot)
            }
            Err(e) => {
                warn!(
                    "Corrupt snapshot at {}, starting empty: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }
}
