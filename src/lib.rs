//! # marketrank
//!
//! Product ranking and search for a marketplace catalog.
//!
//! marketrank scores verified products on rating, price and popularity,
//! keeps the current top 10 in a snapshot and tells the caller when that
//! list changes. It also offers case-insensitive Boyer–Moore search over
//! product names and descriptions.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! marketrank --data-dir ./data top --catalog products.json --subscribers subscribers.json
//! marketrank search --catalog products.json "nepali tea"
//! marketrank compare --catalog products.json --ids 1,2,3
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use marketrank::prelude::*;
//!
//! let catalog = Catalog::from_products(vec![
//!     ProductRecord::new(1u64, "Organic Nepali Tea", 10.0).with_rating(5.0, 50).verified(),
//!     ProductRecord::new(2u64, "Pashmina Shawl", 20.0).with_rating(3.0, 10).verified(),
//! ]).unwrap();
//!
//! let tracker = TopProductsTracker::new(Ranker::default(), InMemorySnapshotStore::new());
//! let ranking = tracker.refresh_catalog(&catalog).unwrap();
//! assert!(ranking.changed);
//!
//! if ranking.changed {
//!     notify_subscribers(
//!         &LogNotifier,
//!         &[Subscriber::new("buyer@example.com")],
//!         &Notification::top_products_changed(),
//!     );
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `marketrank-core` - Product model, snapshots, catalog, Boyer–Moore matcher
//! - `marketrank-ranking` - Weights, scorer, ranker, change detection
//! - `marketrank-storage` - Snapshot stores and the top products tracker

pub mod config;
pub mod notify;

// Re-export core types
pub use marketrank_core::{
    contains, BoyerMoore, Catalog, Error, ProductFilter, ProductId, ProductRecord, Result,
    ScoredProduct, SnapshotEntry, TextQuery, TopSnapshot, Verified,
};

// Re-export ranking
pub use marketrank_ranking::{
    detect_change, weighted_score, ExplainedProduct, Ranker, Ranking, RankingStats,
    ScoreBreakdown, ScoreWeights, Scorer, DEFAULT_TOP_N,
};

// Re-export storage
pub use marketrank_storage::{
    FileSnapshotStore, InMemorySnapshotStore, SnapshotStore, TopProductsTracker,
};

pub use config::RankingConfig;
pub use notify::{notify_subscribers, LogNotifier, Notification, Notifier, Subscriber};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, ProductId, ProductRecord, ScoredProduct, TopSnapshot,
        Ranker, Ranking, ScoreWeights, Scorer,
        SnapshotStore, InMemorySnapshotStore, FileSnapshotStore, TopProductsTracker,
        RankingConfig,
        notify_subscribers, LogNotifier, Notification, Notifier, Subscriber,
        Error, Result,
    };
}
