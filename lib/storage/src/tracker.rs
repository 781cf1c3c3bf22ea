use crate::store::SnapshotStore;
use chrono::Utc;
use marketrank_core::{Catalog, Error, ProductId, ProductRecord, Result, ScoredProduct, TopSnapshot};
use marketrank_ranking::{detect_change, Ranker, Ranking};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

/// Keeps the persisted top-N in step with the live catalog
///
/// The load, compare and replace steps of a refresh run under one lock, so
/// two concurrent refreshes over the same data report a transition once.
/// The store's own lock extends that to trackers in other processes.
pub struct TopProductsTracker<S: SnapshotStore> {
    ranker: Ranker,
    store: S,
    refresh_lock: Mutex<()>,
}

impl<S: SnapshotStore> TopProductsTracker<S> {
    pub fn new(ranker: Ranker, store: S) -> Self {
        Self {
            ranker,
            store,
            refresh_lock: Mutex::new(()),
        }
    }

    #[inline]
    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rank `candidates`, compare with the stored top-N and replace it on change.
    ///
    /// Candidates are expected to be verified products already. If the
    /// replace fails the ranking is returned inside
    /// [`Error::SnapshotNotReplaced`]; the old snapshot stays current, so the
    /// next refresh reports the change again.
    pub fn refresh(&self, candidates: &[ProductRecord]) -> Result<Ranking> {
        let top = self.ranker.top(candidates)?;

        let _guard = self.refresh_lock.lock();
        let _store_guard = self.store.lock()?;

        let previous = match self.store.load_latest() {
            Ok(previous) => previous,
            Err(e) => {
                warn!("Previous top products unreadable, treating as absent: {}", e);
                None
            }
        };

        let changed = detect_change(previous.as_ref(), &top);
        if !changed {
            debug!("Top {} products unchanged", top.len());
            return Ok(Ranking { products: top, changed });
        }

        let snapshot = TopSnapshot::from_ranking(&top, unix_now());
        if let Err(e) = self.store.replace(snapshot) {
            error!("Failed to replace top products snapshot: {}", e);
            return Err(Error::SnapshotNotReplaced {
                ranking: top,
                reason: e.to_string(),
            });
        }

        info!("Top {} products changed", top.len());
        Ok(Ranking { products: top, changed })
    }

    /// Refresh from the verified products of a catalog
    pub fn refresh_catalog(&self, catalog: &Catalog) -> Result<Ranking> {
        self.refresh(&catalog.verified())
    }

    /// Score a chosen set of products against each other, best first.
    /// Does not touch the snapshot.
    pub fn compare(&self, catalog: &Catalog, ids: &[ProductId]) -> Result<Vec<ScoredProduct>> {
        let products = catalog.get_many(ids);
        if products.is_empty() {
            return Err(Error::NoCandidates);
        }
        self.ranker.compare(&products)
    }
}

fn unix_now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}
