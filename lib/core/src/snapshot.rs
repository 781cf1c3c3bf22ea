use serde::{Deserialize, Serialize};
use crate::product::{ProductId, ScoredProduct};

/// One position of a persisted top-N ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub product_id: ProductId,
    pub score: f64,
}

/// The last known top-N ranking, kept only to detect changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSnapshot {
    pub entries: Vec<SnapshotEntry>,
    /// Unix seconds
    #[serde(default)]
    pub created_at: u64,
}

impl TopSnapshot {
    #[inline]
    #[must_use]
    pub fn new(entries: Vec<SnapshotEntry>, created_at: u64) -> Self {
        Self { entries, created_at }
    }

    /// Capture the (id, score) pairs of a ranking in order
    pub fn from_ranking(ranking: &[ScoredProduct], created_at: u64) -> Self {
        let entries = ranking
            .iter()
            .map(|scored| SnapshotEntry {
                product_id: scored.id().clone(),
                score: scored.score,
            })
            .collect();
        Self { entries, created_at }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn product_ids(&self) -> impl Iterator<Item = &ProductId> {
        self.entries.iter().map(|e| &e.product_id)
    }
}
