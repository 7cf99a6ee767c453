//! JSON Collection - Atomic Document Collection Persistence
//!
//! Persists one collection of records as a single JSON file using
//! atomic writes (write to tmp file, then rename). This guarantees
//! crash safety and prevents partial writes from corrupting the
//! collection. An in-memory index under an RwLock serves reads; every
//! mutation rewrites the file before returning.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// Atomic JSON collection store.
///
/// The file is written to a temporary path first, then atomically
/// renamed. The on-disk file is always either the old or new version,
/// never a partial write.
pub struct JsonCollection<T> {
    /// Collection name, used in logs.
    name: &'static str,
    /// Path to `<name>.json`.
    path: PathBuf,
    /// Temporary path for atomic writes.
    tmp_path: PathBuf,
    /// In-memory record index.
    records: RwLock<Vec<T>>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Open a collection in the given data directory, creating the
    /// directory if needed and loading any existing records.
    pub async fn open(data_dir: &str, name: &'static str) -> Result<Self> {
        let dir = Path::new(data_dir);
        fs::create_dir_all(dir)
            .await
            .context("Failed to create data directory")?;

        let path = dir.join(format!("{name}.json"));
        let tmp_path = dir.join(format!("{name}.json.tmp"));

        let records = if path.exists() {
            let json = fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {name} collection"))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse {name} collection"))?
        } else {
            Vec::new()
        };

        info!(collection = name, records = records.len(), "Collection opened");

        Ok(Self {
            name,
            path,
            tmp_path,
            records: RwLock::new(records),
        })
    }

    /// Run a closure over the current records.
    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        let guard = self.records.read().await;
        f(&guard)
    }

    /// Mutate the records and persist the result atomically.
    ///
    /// The write lock is held across the file write, so mutations are
    /// serialized and the on-disk state always reflects a completed
    /// mutation.
    #[instrument(skip(self, f), fields(collection = self.name))]
    pub async fn mutate<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let mut guard = self.records.write().await;
        let result = f(&mut guard);

        let json = serde_json::to_string_pretty(&*guard)
            .with_context(|| format!("Failed to serialize {} collection", self.name))?;

        fs::write(&self.tmp_path, &json)
            .await
            .with_context(|| format!("Failed to write tmp {} file", self.name))?;

        fs::rename(&self.tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to rename {} file", self.name))?;

        Ok(result)
    }

    /// Check if the collection file location is writable.
    pub async fn is_healthy(&self) -> bool {
        let probe = self.path.with_extension("health_check");
        let result = fs::write(&probe, b"ok").await;
        let _ = fs::remove_file(&probe).await;
        result.is_ok()
    }
}
