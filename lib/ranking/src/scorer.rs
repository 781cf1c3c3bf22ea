//! Weighted product scoring
//!
//! A product's score is the weighted sum of three percentages:
//!
//! - rating: `rating / 5 * 100` (unrated counts as 0)
//! - price: `(max_price - price) / max_price * 100`, cheaper scores higher
//! - rating count: `rating_count / reference * 100`, not capped at 100
//!
//! `max_price` is the highest price in the population being scored, so the
//! price component of every product depends on the most expensive one.
//! When `max_price` is not positive (every candidate is free) the price
//! component contributes 0.

use crate::weights::ScoreWeights;
use marketrank_core::{ProductRecord, MAX_RATING};
use serde::Serialize;

/// Weighted contribution of each component to a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub rating: f64,
    pub price: f64,
    pub rating_count: f64,
}

impl ScoreBreakdown {
    #[inline]
    pub fn total(&self) -> f64 {
        self.rating + self.price + self.rating_count
    }

    /// Name of the largest contribution
    pub fn dominant(&self) -> &'static str {
        let mut best = ("rating", self.rating);
        for candidate in [("price", self.price), ("rating_count", self.rating_count)] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }
}

/// Rating as a percentage of the maximum rating
#[inline]
pub fn rating_percentage(rating: f64) -> f64 {
    (rating / MAX_RATING) * 100.0
}

/// How far below the population's maximum price a product sits, in percent
#[inline]
pub fn price_percentage(price: f64, max_price: f64) -> f64 {
    if !(max_price.is_finite() && max_price > 0.0) {
        return 0.0;
    }
    ((max_price - price) / max_price) * 100.0
}

#[inline]
pub fn rating_count_percentage(rating_count: u64, reference: f64) -> f64 {
    (rating_count as f64 / reference) * 100.0
}

/// Computes product scores for a given set of weights
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoreWeights,
}

impl Scorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Per-component contributions for raw inputs
    pub fn breakdown(&self, rating: f64, price: f64, max_price: f64, rating_count: u64) -> ScoreBreakdown {
        ScoreBreakdown {
            rating: rating_percentage(rating) * self.weights.rating,
            price: price_percentage(price, max_price) * self.weights.price,
            rating_count: rating_count_percentage(rating_count, self.weights.rating_count_reference)
                * self.weights.rating_count,
        }
    }

    pub fn score(&self, rating: f64, price: f64, max_price: f64, rating_count: u64) -> f64 {
        self.breakdown(rating, price, max_price, rating_count).total()
    }

    pub fn breakdown_product(&self, product: &ProductRecord, max_price: f64) -> ScoreBreakdown {
        self.breakdown(
            product.effective_rating(),
            product.price,
            max_price,
            product.rating_count,
        )
    }

    #[inline]
    pub fn score_product(&self, product: &ProductRecord, max_price: f64) -> f64 {
        self.breakdown_product(product, max_price).total()
    }
}

/// Score with the default weights (0.5 rating, 0.3 price, 0.2 rating count)
pub fn weighted_score(rating: f64, price: f64, max_price: f64, rating_count: u64) -> f64 {
    Scorer::default().score(rating, price, max_price, rating_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_documented_example() {
        // max price 20
        assert!((weighted_score(5.0, 10.0, 20.0, 50) - 75.0).abs() < EPS);
        assert!((weighted_score(3.0, 20.0, 20.0, 10) - 32.0).abs() < EPS);
    }

    #[test]
    fn test_matches_weighted_sum() {
        let inputs = [
            (4.2, 13.0, 99.0, 7u64),
            (0.0, 0.0, 50.0, 0),
            (1.0, 50.0, 50.0, 1000),
            (2.5, 1.99, 2.49, 3),
        ];

        for (rating, price, max_price, count) in inputs {
            let expected = (rating / 5.0) * 100.0 * 0.5
                + ((max_price - price) / max_price) * 100.0 * 0.3
                + (count as f64 / 100.0) * 100.0 * 0.2;
            let got = weighted_score(rating, price, max_price, count);
            assert!((got - expected).abs() < EPS, "expected {}, got {}", expected, got);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = weighted_score(4.5, 12.0, 40.0, 33);
        let b = weighted_score(4.5, 12.0, 40.0, 33);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_rating_count_not_capped() {
        let breakdown = Scorer::default().breakdown(0.0, 10.0, 10.0, 250);
        // 250% * 0.2
        assert!((breakdown.rating_count - 50.0).abs() < EPS);
        assert_eq!(breakdown.dominant(), "rating_count");
    }

    #[test]
    fn test_zero_max_price_contributes_nothing() {
        let score = weighted_score(5.0, 0.0, 0.0, 0);
        assert!(score.is_finite());
        assert!((score - 50.0).abs() < EPS);
        assert_eq!(price_percentage(0.0, 0.0), 0.0);
        assert_eq!(price_percentage(1.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn test_breakdown_sums_to_score() {
        let scorer = Scorer::new(ScoreWeights::new(0.6, 0.2, 0.2));
        let product = ProductRecord::new(1u64, "Tea", 8.0).with_rating(4.0, 20);
        let breakdown = scorer.breakdown_product(&product, 16.0);

        assert!((breakdown.total() - scorer.score_product(&product, 16.0)).abs() < EPS);
        assert!((breakdown.rating - 48.0).abs() < EPS);
        assert!((breakdown.price - 10.0).abs() < EPS);
        assert!((breakdown.rating_count - 4.0).abs() < EPS);
    }

    #[test]
    fn test_unrated_product() {
        let product = ProductRecord::new(1u64, "New arrival", 5.0);
        let breakdown = Scorer::default().breakdown_product(&product, 10.0);
        assert_eq!(breakdown.rating, 0.0);
        assert!((breakdown.price - 15.0).abs() < EPS);
    }
}
