//! Ranker for product populations
//!
//! Scores a population against its own maximum price, sorts it and keeps
//! the best `top_n`. Sorting is stable: products with equal scores keep
//! the order in which the catalog handed them over.

use crate::diff::detect_change;
use crate::scorer::{ScoreBreakdown, Scorer};
use crate::weights::ScoreWeights;
use marketrank_core::{max_price, Error, ProductRecord, Result, ScoredProduct, TopSnapshot};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::cmp::Reverse;

/// Number of products kept in the top list
pub const DEFAULT_TOP_N: usize = 10;

/// Outcome of a ranking pass
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// Best products, highest score first
    pub products: Vec<ScoredProduct>,
    /// Whether the list differs from the previous snapshot
    pub changed: bool,
}

impl Ranking {
    /// Snapshot of this ranking, suitable for persisting
    pub fn to_snapshot(&self, created_at: u64) -> TopSnapshot {
        TopSnapshot::from_ranking(&self.products, created_at)
    }
}

/// Ranker over product records
#[derive(Debug, Clone)]
pub struct Ranker {
    scorer: Scorer,
    top_n: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(Scorer::default(), DEFAULT_TOP_N)
    }
}

impl Ranker {
    pub fn new(scorer: Scorer, top_n: usize) -> Self {
        Self { scorer, top_n }
    }

    /// Ranker with custom weights; weights are validated and normalized
    pub fn with_weights(mut weights: ScoreWeights, top_n: usize) -> Result<Self> {
        weights.validate_and_normalize()?;
        Ok(Self::new(Scorer::new(weights), top_n))
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Score every product in input order
    pub fn score_all(&self, products: &[ProductRecord]) -> Result<Vec<ScoredProduct>> {
        let max_price = max_price(products).ok_or(Error::NoCandidates)?;

        let scored = products
            .par_iter()
            .map(|product| {
                let score = self.scorer.score_product(product, max_price);
                ScoredProduct::new(product.clone(), score)
            })
            .collect();

        Ok(scored)
    }

    /// Score and sort the whole population, highest score first
    pub fn compare(&self, products: &[ProductRecord]) -> Result<Vec<ScoredProduct>> {
        let mut scored = self.score_all(products)?;
        sort_descending(&mut scored);
        Ok(scored)
    }

    /// The best `top_n` products
    pub fn top(&self, products: &[ProductRecord]) -> Result<Vec<ScoredProduct>> {
        let mut ranked = self.compare(products)?;
        ranked.truncate(self.top_n);
        Ok(ranked)
    }

    /// Top products plus a change verdict against `previous`.
    /// Pure: persisting the new snapshot is up to the caller.
    pub fn rank(&self, products: &[ProductRecord], previous: Option<&TopSnapshot>) -> Result<Ranking> {
        let top = self.top(products)?;
        let changed = detect_change(previous, &top);

        tracing::debug!(
            candidates = products.len(),
            kept = top.len(),
            changed,
            "ranked products"
        );

        Ok(Ranking { products: top, changed })
    }

    /// Per-component contributions for each product of a population
    pub fn explain(&self, products: &[ProductRecord]) -> Result<Vec<(ScoredProduct, ScoreBreakdown)>> {
        let max_price = max_price(products).ok_or(Error::NoCandidates)?;
        let mut explained: Vec<_> = products
            .iter()
            .map(|product| {
                let breakdown = self.scorer.breakdown_product(product, max_price);
                (ScoredProduct::new(product.clone(), breakdown.total()), breakdown)
            })
            .collect();

        explained.sort_by_key(|(scored, _)| Reverse(OrderedFloat(scored.score)));
        Ok(explained)
    }
}

/// Stable sort, highest score first
pub fn sort_descending(scored: &mut [ScoredProduct]) {
    scored.sort_by_key(|s| Reverse(OrderedFloat(s.score)));
}
