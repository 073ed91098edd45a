//! Per-session snapshot storage.
//!
//! A snapshot is the ranked shortlist one session last computed; `details`
//! and "back" actions read it instead of re-fetching. Stores answer
//! absence (expired included) with `None`, which the engine maps to
//! [`ScreenError::StaleSnapshot`](crate::ScreenError::StaleSnapshot).

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::RankedBond;

/// Snapshots older than this read as absent.
pub const DEFAULT_SNAPSHOT_TTL: Duration = Duration::from_secs(30 * 60);

/// Per-session snapshot persistence contract.
///
/// Keys are free-form session identifiers (chat id, CLI profile name).
/// A store replaces snapshots wholesale and never patches in place.
pub trait SnapshotStore: Send + Sync {
    /// Replace the snapshot stored under `key`.
    fn store<'a>(
        &'a self,
        key: &'a str,
        snapshot: Vec<RankedBond>,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

    /// Load the snapshot under `key`; absent or expired reads as `None`.
    fn load<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<Vec<RankedBond>>> + Send + 'a>>;

    /// Drop the snapshot under `key`, if any.
    fn expire<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

#[derive(Debug, Clone)]
struct SnapshotEntry {
    bonds: Vec<RankedBond>,
    expires_at: Instant,
}

/// TTL-bound in-memory store for long-running front ends.
///
/// Clones share the same underlying map. Same-key concurrent writes are
/// last-writer-wins, which matches how refreshes race in practice.
#[derive(Debug, Clone)]
pub struct InMemorySnapshotStore {
    inner: Arc<tokio::sync::RwLock<HashMap<String, SnapshotEntry>>>,
    ttl: Duration,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SNAPSHOT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Number of entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Purge entries past their TTL.
    pub async fn clear_expired(&self) {
        let now = Instant::now();
        self.inner
            .write()
            .await
            .retain(|_, entry| entry.expires_at > now);
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn store<'a>(
        &'a self,
        key: &'a str,
        snapshot: Vec<RankedBond>,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let entry = SnapshotEntry {
                bonds: snapshot,
                expires_at: Instant::now() + self.ttl,
            };
            self.inner.write().await.insert(String::from(key), entry);
        })
    }

    fn load<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<Vec<RankedBond>>> + Send + 'a>> {
        Box::pin(async move {
            let guard = self.inner.read().await;
            guard.get(key).and_then(|entry| {
                if Instant::now() <= entry.expires_at {
                    Some(entry.bonds.clone())
                } else {
                    None
                }
            })
        })
    }

    fn expire<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            self.inner.write().await.remove(key);
        })
    }
}
