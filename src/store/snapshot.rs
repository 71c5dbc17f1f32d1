use super::collection::{Collection, Record};
use super::StoreError;
use crate::utils::{atomic_write, now};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

/// Current snapshot schema version
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// On-disk form of one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<T> {
    pub schema_version: u32,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub sequence: u32,
    pub items: Vec<T>,
}

/// Accepts both the versioned snapshot and the bare JSON array written by
/// the first generation of the tracker.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile<T> {
    Versioned(Snapshot<T>),
    Legacy(Vec<T>),
}

/// Writes and reads per-collection snapshot files in one data directory.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
    retries: u32,
}

impl SnapshotWriter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, retries: u32) -> Self {
        Self {
            dir: dir.into(),
            retries,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for<T: Record>(&self) -> PathBuf {
        self.dir.join(T::KIND.file_name())
    }

    /// Load a collection. `Ok(None)` when no snapshot exists yet.
    pub async fn load<T: Record>(&self) -> Result<Option<Collection<T>>, StoreError> {
        let path = self.path_for::<T>();
        if !path.exists() {
            debug!("No snapshot at {}", path.display());
            return Ok(None);
        }
        let content = fs::read_to_string(&path).await?;
        let collection = match serde_json::from_str::<SnapshotFile<T>>(&content)? {
            SnapshotFile::Versioned(snapshot) => {
                Collection::from_parts(snapshot.items, snapshot.sequence)
            }
            SnapshotFile::Legacy(items) => {
                info!("Migrating legacy array snapshot {}", path.display());
                Collection::from_parts(items, 0)
            }
        };
        debug!(
            "Loaded {} {} record(s) from {}",
            collection.len(),
            T::KIND,
            path.display()
        );
        Ok(Some(collection))
    }

    /// Write one snapshot attempt.
    pub async fn write<T: Record>(&self, collection: &Collection<T>) -> Result<(), StoreError> {
        let snapshot = Snapshot {
            schema_version: CURRENT_SCHEMA_VERSION,
            updated_at: now(),
            sequence: collection.sequence(),
            items: collection.items().to_vec(),
        };
        let content = serde_json::to_string_pretty(&snapshot)?;
        fs::create_dir_all(&self.dir).await?;
        atomic_write(&self.path_for::<T>(), &content).await?;
        Ok(())
    }

    /// Write a snapshot, retrying transient failures with a short linear backoff.
    pub async fn write_with_retry<T: Record>(
        &self,
        collection: &Collection<T>,
    ) -> Result<(), StoreError> {
        let mut attempt: u32 = 0;
        loop {
            match self.write(collection).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.retries => {
                    attempt = attempt.saturating_add(1);
                    warn!(
                        "Snapshot write for {} failed (attempt {attempt}): {e}",
                        T::KIND
                    );
                    tokio::time::sleep(Duration::from_millis(u64::from(attempt) * 20)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
