// JSON file snapshot store with atomic replace
use crate::store::{SnapshotStore, StoreGuard};
use anyhow::{anyhow, Result as AnyResult};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::DateTime;
use fs2::FileExt;
use std::fs::OpenOptions;
use marketrank_core::{Error, Result, TopSnapshot};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

const SNAPSHOT_FILE: &str = "top_products.json";
const LOCK_FILE: &str = "top_products.lock";

/// Snapshot description for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDescription {
    pub path: PathBuf,
    pub creation_time: Option<String>,
    pub size: u64,
    pub entries: usize,
}

/// Keeps the current snapshot as a single JSON file.
///
/// Replacing writes a temporary file next to the target and renames it
/// over the old one, so the file on disk is always a complete snapshot.
/// [`SnapshotStore::lock`] takes an advisory lock on a sidecar file, which
/// serializes refreshes from separate processes sharing the data directory.
pub struct FileSnapshotStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileSnapshotStore {
    /// Store rooted in `data_dir`, created if missing
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(SNAPSHOT_FILE),
            lock_path: data_dir.join(LOCK_FILE),
        })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    fn lock_file(&self) -> AnyResult<std::fs::File> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(|e| anyhow!("open snapshot lock {}: {}", self.lock_path.display(), e))?;

        file.lock_exclusive()
            .map_err(|e| anyhow!("acquire snapshot lock {}: {}", self.lock_path.display(), e))?;
        Ok(file)
    }

    fn read_snapshot(&self) -> AnyResult<Option<TopSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = std::fs::read(&self.path)?;
        let snapshot = serde_json::from_slice(&data)
            .map_err(|e| anyhow!("Corrupt snapshot {:?}: {}", self.path, e))?;
        Ok(Some(snapshot))
    }

    fn write_snapshot(&self, snapshot: &TopSnapshot) -> AnyResult<()> {
        let data = serde_json::to_vec_pretty(snapshot)?;
        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(&data))
            .map_err(|e| anyhow!("Failed to write snapshot {:?}: {}", self.path, e))?;
        Ok(())
    }

    /// Describe the snapshot currently on disk, if any
    pub fn describe(&self) -> Result<Option<SnapshotDescription>> {
        let Some(snapshot) = self.load_latest()? else {
            return Ok(None);
        };

        let metadata = std::fs::metadata(&self.path)?;
        let creation_time = DateTime::from_timestamp(snapshot.created_at as i64, 0)
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string());

        Ok(Some(SnapshotDescription {
            path: self.path.clone(),
            creation_time,
            size: metadata.len(),
            entries: snapshot.len(),
        }))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load_latest(&self) -> Result<Option<TopSnapshot>> {
        self.read_snapshot()
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    fn replace(&self, snapshot: TopSnapshot) -> Result<()> {
        self.write_snapshot(&snapshot)
            .map_err(|e| Error::Persistence(e.to_string()))?;
        tracing::debug!("Snapshot with {} entries written to {:?}", snapshot.len(), self.path);
        Ok(())
    }

    fn lock(&self) -> Result<StoreGuard> {
        let file = self.lock_file().map_err(|e| Error::Storage(e.to_string()))?;
        Ok(StoreGuard::locked_file(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketrank_core::SnapshotEntry;

    fn sample() -> TopSnapshot {
        TopSnapshot::new(
            vec![
                SnapshotEntry { product_id: 1u64.into(), score: 75.0 },
                SnapshotEntry { product_id: "abc".into(), score: 15.000000000000002 },
            ],
            1_700_000_000,
        )
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path()).unwrap();
        assert!(store.load_latest().unwrap().is_none());
        assert!(store.describe().unwrap().is_none());
    }

    #[test]
    fn test_replace_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileSnapshotStore::new(dir.path()).unwrap();
            store.replace(sample()).unwrap();
        }

        let store = FileSnapshotStore::new(dir.path()).unwrap();
        assert_eq!(store.load_latest().unwrap(), Some(sample()));

        let description = store.describe().unwrap().unwrap();
        assert_eq!(description.entries, 2);
        assert_eq!(description.creation_time.as_deref(), Some("2023-11-14T22:13:20Z"));
    }

    #[test]
    fn test_replace_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path()).unwrap();
        store.replace(sample()).unwrap();

        let newer = TopSnapshot::new(vec![SnapshotEntry { product_id: 9u64.into(), score: 1.0 }], 5);
        store.replace(newer.clone()).unwrap();
        assert_eq!(store.load_latest().unwrap(), Some(newer));
    }

    #[test]
    fn test_lock_is_exclusive_until_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path()).unwrap();

        let guard = store.lock().unwrap();
        let other = std::fs::File::open(store.lock_path()).unwrap();
        assert!(other.try_lock_exclusive().is_err());

        drop(guard);
        assert!(other.try_lock_exclusive().is_ok());
        FileExt::unlock(&other).unwrap();
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path()).unwrap();
        std::fs::write(store.path(), b"{ not json").unwrap();

        assert!(matches!(store.load_latest(), Err(Error::Serialization(_))));
    }
}
