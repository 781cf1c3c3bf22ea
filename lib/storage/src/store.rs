use fs2::FileExt;
use marketrank_core::{Result, TopSnapshot};
use std::fs::File;

/// Holds the single current top-N snapshot.
///
/// `replace` must be all-or-nothing: a reader sees either the old entries
/// or the new ones, never a mix.
pub trait SnapshotStore: Send + Sync {
    /// The current snapshot, `None` before the first ranking is stored
    fn load_latest(&self) -> Result<Option<TopSnapshot>>;

    /// Drop the current snapshot and store `snapshot` in its place
    fn replace(&self, snapshot: TopSnapshot) -> Result<()>;

    /// Exclude every other writer of the same underlying store until the
    /// guard drops. Stores shared between processes must override this;
    /// the default only suits stores private to one process.
    fn lock(&self) -> Result<StoreGuard> {
        Ok(StoreGuard::unlocked())
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for std::sync::Arc<S> {
    fn load_latest(&self) -> Result<Option<TopSnapshot>> {
        (**self).load_latest()
    }

    fn replace(&self, snapshot: TopSnapshot) -> Result<()> {
        (**self).replace(snapshot)
    }

    fn lock(&self) -> Result<StoreGuard> {
        (**self).lock()
    }
}

/// Exclusive hold on a snapshot store, released on drop
pub struct StoreGuard {
    file: Option<File>,
}

impl StoreGuard {
    /// Guard that holds nothing
    pub fn unlocked() -> Self {
        Self { file: None }
    }

    /// Guard over an already locked file
    pub(crate) fn locked_file(file: File) -> Self {
        Self { file: Some(file) }
    }
}

impl Drop for StoreGuard {
    fn drop(&mut self) {
        if let Some(file) = &self.file {
            let _ = FileExt::unlock(file);
        }
    }
}
