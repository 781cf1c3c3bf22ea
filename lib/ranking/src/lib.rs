//! # marketrank Ranking
//!
//! Weighted scoring and top-N ranking of marketplace products.
//!
//! ## Features
//!
//! - **Score weights**: rating, price and rating-count components, validated and normalized
//! - **Population-relative pricing**: the price component is scaled against the most expensive candidate
//! - **Stable ranking**: equal scores keep catalog order
//! - **Change detection**: positional comparison with the previous top-N snapshot
//! - **Explainability**: per-component contribution breakdown
//!
//! ## Example
//!
//! ```rust
//! use marketrank_core::ProductRecord;
//! use marketrank_ranking::Ranker;
//!
//! let products = vec![
//!     ProductRecord::new(1u64, "Organic Nepali Tea", 10.0).with_rating(5.0, 50).verified(),
//!     ProductRecord::new(2u64, "Pashmina Shawl", 20.0).with_rating(3.0, 10).verified(),
//! ];
//!
//! let ranking = Ranker::default().rank(&products, None).unwrap();
//! assert!(ranking.changed);
//! assert!((ranking.products[0].score - 75.0).abs() < 1e-9);
//! ```
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Candidates │────>│   Scorer    │────>│ Sort + top N│
//! │ (verified)  │     │ (weights)   │     │  (stable)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌──────┴──────┐
//!                     │  Previous   │────>│   Change    │
//!                     │  snapshot   │     │  detection  │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod weights;
pub mod scorer;
pub mod diff;
pub mod rank;
pub mod explain;

pub use weights::{ScoreWeights, WeightsError};
pub use scorer::{weighted_score, ScoreBreakdown, Scorer};
pub use diff::detect_change;
pub use rank::{sort_descending, Ranker, Ranking, DEFAULT_TOP_N};
pub use explain::{ExplainedProduct, RankingStats};
