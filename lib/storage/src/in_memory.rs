use crate::store::SnapshotStore;
use marketrank_core::{Result, TopSnapshot};
use parking_lot::RwLock;

/// Snapshot store kept in process memory
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    current: RwLock<Option<TopSnapshot>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing snapshot
    pub fn with_snapshot(snapshot: TopSnapshot) -> Self {
        Self {
            current: RwLock::new(Some(snapshot)),
        }
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load_latest(&self) -> Result<Option<TopSnapshot>> {
        Ok(self.current.read().clone())
    }

    fn replace(&self, snapshot: TopSnapshot) -> Result<()> {
        *self.current.write() = Some(snapshot);
        Ok(())
    }
}
