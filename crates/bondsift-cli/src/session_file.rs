//! File-backed session snapshots.
//!
//! One-shot invocations cannot keep an in-memory store alive between
//! processes, so snapshots live as one JSON file per session key under a
//! state directory. Freshness follows the same TTL rule as the in-memory
//! store, keyed off the written-at timestamp embedded in the payload.
//! Storage faults never fail a command: a write that cannot land is
//! logged and dropped, and an unreadable file reads as absent.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use bondsift_core::{RankedBond, SnapshotStore, UtcTimestamp, DEFAULT_SNAPSHOT_TTL};

/// On-disk snapshot payload: the ranked bonds plus freshness bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSnapshot {
    written_at: UtcTimestamp,
    bonds: Vec<RankedBond>,
}

/// JSON-file-per-session snapshot store, so `screen` can be followed by
/// `details` and `list` from separate processes.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
    ttl: Duration,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_ttl(dir, DEFAULT_SNAPSHOT_TTL)
    }

    pub fn with_ttl(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// Session keys are free-form; anything outside `[A-Za-z0-9_-]`
    /// flattens to `_` so a key can never escape the state directory.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut safe: String = key
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                    ch
                } else {
                    '_'
                }
            })
            .collect();
        if safe.is_empty() {
            safe.push_str("default");
        }

        self.dir.join(format!("{safe}.json"))
    }

    fn is_fresh(&self, snapshot: &StoredSnapshot) -> bool {
        let age = UtcTimestamp::now().seconds_since(snapshot.written_at);
        age <= self.ttl.as_secs() as i64
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn store<'a>(
        &'a self,
        key: &'a str,
        snapshot: Vec<RankedBond>,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let payload = StoredSnapshot {
                written_at: UtcTimestamp::now(),
                bonds: snapshot,
            };
            let path = self.path_for(key);
            if let Err(error) = write_snapshot(&self.dir, &path, &payload).await {
                warn!("session store: dropping snapshot for '{key}': {error}");
            }
        })
    }

    fn load<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<Vec<RankedBond>>> + Send + 'a>> {
        Box::pin(async move {
            let path = self.path_for(key);
            let raw = match tokio::fs::read(&path).await {
                Ok(raw) => raw,
                Err(_) => return None,
            };

            let snapshot: StoredSnapshot = match serde_json::from_slice(&raw) {
                Ok(snapshot) => snapshot,
                Err(error) => {
                    warn!(
                        "session store: unreadable snapshot at {}: {error}",
                        path.display()
                    );
                    return None;
                }
            };

            if !self.is_fresh(&snapshot) {
                debug!("session store: snapshot for '{key}' is past its TTL");
                return None;
            }

            Some(snapshot.bonds)
        })
    }

    fn expire<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let path = self.path_for(key);
            if let Err(error) = tokio::fs::remove_file(&path).await {
                if error.kind() != std::io::ErrorKind::NotFound {
                    warn!("session store: could not expire '{key}': {error}");
                }
            }
        })
    }
}

async fn write_snapshot(
    dir: &Path,
    path: &Path,
    payload: &StoredSnapshot,
) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    let raw = serde_json::to_vec(payload)?;
    tokio::fs::write(path, raw).await
}
