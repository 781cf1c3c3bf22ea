//! Score weights
//!
//! Declares how much each component contributes to a product's score.
//! Each component is first expressed as a percentage (0-100 for rating and
//! price; rating count is unbounded) and then multiplied by its weight.

use serde::{Deserialize, Serialize};

/// Default weight of the rating component
pub const DEFAULT_RATING_WEIGHT: f64 = 0.5;
/// Default weight of the price component
pub const DEFAULT_PRICE_WEIGHT: f64 = 0.3;
/// Default weight of the rating count component
pub const DEFAULT_RATING_COUNT_WEIGHT: f64 = 0.2;
/// Rating count that maps to 100%
pub const DEFAULT_RATING_COUNT_REFERENCE: f64 = 100.0;

/// Weights of the three score components
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreWeights {
    #[serde(default = "default_rating")]
    pub rating: f64,

    #[serde(default = "default_price")]
    pub price: f64,

    #[serde(default = "default_rating_count")]
    pub rating_count: f64,

    /// Rating count treated as 100%. Counts above it push the
    /// percentage past 100; it is a scale, not a cap.
    #[serde(default = "default_rating_count_reference")]
    pub rating_count_reference: f64,
}

fn default_rating() -> f64 {
    DEFAULT_RATING_WEIGHT
}

fn default_price() -> f64 {
    DEFAULT_PRICE_WEIGHT
}

fn default_rating_count() -> f64 {
    DEFAULT_RATING_COUNT_WEIGHT
}

fn default_rating_count_reference() -> f64 {
    DEFAULT_RATING_COUNT_REFERENCE
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rating: DEFAULT_RATING_WEIGHT,
            price: DEFAULT_PRICE_WEIGHT,
            rating_count: DEFAULT_RATING_COUNT_WEIGHT,
            rating_count_reference: DEFAULT_RATING_COUNT_REFERENCE,
        }
    }
}

impl ScoreWeights {
    pub fn new(rating: f64, price: f64, rating_count: f64) -> Self {
        Self {
            rating,
            price,
            rating_count,
            rating_count_reference: DEFAULT_RATING_COUNT_REFERENCE,
        }
    }

    /// Validate the weights
    /// - Checks that weights are finite and non-negative
    /// - Normalizes weights to sum to 1.0 if they don't
    pub fn validate_and_normalize(&mut self) -> Result<(), WeightsError> {
        for (name, weight) in self.named() {
            if !weight.is_finite() {
                return Err(WeightsError::NotFinite(name));
            }
            if weight < 0.0 {
                return Err(WeightsError::NegativeWeight(name));
            }
        }

        if !self.rating_count_reference.is_finite() || self.rating_count_reference <= 0.0 {
            return Err(WeightsError::InvalidReference(self.rating_count_reference));
        }

        let weight_sum = self.sum();
        if weight_sum <= 0.0 {
            return Err(WeightsError::ZeroTotalWeight);
        }

        if (weight_sum - 1.0).abs() > 1e-9 {
            self.rating /= weight_sum;
            self.price /= weight_sum;
            self.rating_count /= weight_sum;
        }

        Ok(())
    }

    #[inline]
    pub fn sum(&self) -> f64 {
        self.rating + self.price + self.rating_count
    }

    fn named(&self) -> [(&'static str, f64); 3] {
        [
            ("rating", self.rating),
            ("price", self.price),
            ("rating_count", self.rating_count),
        ]
    }
}

/// Errors that can occur during weight validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightsError {
    #[error("Weight '{0}' is negative")]
    NegativeWeight(&'static str),

    #[error("Weight '{0}' is not a finite number")]
    NotFinite(&'static str),

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,

    #[error("Rating count reference must be positive, got {0}")]
    InvalidReference(f64),
}

impl From<WeightsError> for marketrank_core::Error {
    fn from(e: WeightsError) -> Self {
        marketrank_core::Error::InvalidConfig(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_sum_to_one() {
        let mut weights = ScoreWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-12);

        weights.validate_and_normalize().unwrap();
        assert_eq!(weights, ScoreWeights::default());
    }

    #[test]
    fn test_normalization() {
        let mut weights = ScoreWeights::new(2.0, 1.0, 1.0);
        weights.validate_and_normalize().unwrap();

        assert!((weights.sum() - 1.0).abs() < 1e-12);
        assert!((weights.rating - 0.5).abs() < 1e-12);
        assert!((weights.price - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_negative_weight() {
        let mut weights = ScoreWeights::new(0.5, -0.3, 0.2);
        assert_eq!(
            weights.validate_and_normalize(),
            Err(WeightsError::NegativeWeight("price"))
        );
    }

    #[test]
    fn test_zero_total() {
        let mut weights = ScoreWeights::new(0.0, 0.0, 0.0);
        assert_eq!(weights.validate_and_normalize(), Err(WeightsError::ZeroTotalWeight));
    }

    #[test]
    fn test_non_finite() {
        let mut weights = ScoreWeights::new(f64::NAN, 0.3, 0.2);
        assert_eq!(weights.validate_and_normalize(), Err(WeightsError::NotFinite("rating")));

        let mut weights = ScoreWeights::default();
        weights.rating_count_reference = 0.0;
        assert!(matches!(
            weights.validate_and_normalize(),
            Err(WeightsError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let weights: ScoreWeights = serde_json::from_str(r#"{"price": 0.6}"#).unwrap();
        assert_eq!(weights.price, 0.6);
        assert_eq!(weights.rating, DEFAULT_RATING_WEIGHT);
        assert_eq!(weights.rating_count_reference, DEFAULT_RATING_COUNT_REFERENCE);
    }
}
