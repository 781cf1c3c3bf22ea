//! # marketrank Core
//!
//! Core library for the marketrank product ranking engine.
//!
//! This crate provides the data model and the search primitives:
//!
//! - [`ProductRecord`] - A catalog product with price and rating data
//! - [`ScoredProduct`] - A product plus the score it earned
//! - [`TopSnapshot`] - The last persisted top-N ranking
//! - [`Catalog`] - In-memory product collection with verified-only search
//! - [`BoyerMoore`] - Bad-character substring search
//!
//! ## Example
//!
//! ```rust
//! use marketrank_core::{Catalog, ProductRecord};
//!
//! let catalog = Catalog::from_products(vec![
//!     ProductRecord::new(1u64, "Organic Nepali Tea", 10.0).verified(),
//!     ProductRecord::new(2u64, "Pashmina Shawl", 20.0).verified(),
//! ]).unwrap();
//!
//! let hits = catalog.search("nepali");
//! assert_eq!(hits.len(), 1);
//! ```

pub mod catalog;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod product;
pub mod snapshot;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use filter::{All, IdIn, ProductFilter, TextQuery, Verified};
pub use matcher::{contains, BoyerMoore};
pub use product::{max_price, ProductId, ProductRecord, ScoredProduct, MAX_RATING, MIN_RATING};
pub use snapshot::{SnapshotEntry, TopSnapshot};
