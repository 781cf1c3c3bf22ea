//! Explainability for ranked products
//!
//! Output structures showing how each score was put together, one
//! weighted contribution per component.

use crate::scorer::ScoreBreakdown;
use marketrank_core::{ProductId, ProductRecord, ScoredProduct};
use serde::Serialize;

/// A ranked product with its per-component score breakdown
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedProduct {
    pub id: ProductId,
    pub score: f64,
    /// Full product record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRecord>,
    /// Weighted contribution of each component
    pub explain: ScoreBreakdown,
}

impl ExplainedProduct {
    pub fn new(scored: ScoredProduct, breakdown: ScoreBreakdown, include_product: bool) -> Self {
        Self {
            id: scored.product.id.clone(),
            score: scored.score,
            product: if include_product { Some(scored.product) } else { None },
            explain: breakdown,
        }
    }

    pub fn from_list(
        explained: Vec<(ScoredProduct, ScoreBreakdown)>,
        include_product: bool,
    ) -> Vec<Self> {
        explained
            .into_iter()
            .map(|(scored, breakdown)| Self::new(scored, breakdown, include_product))
            .collect()
    }
}

/// Summary statistics for a ranking pass
#[derive(Debug, Clone, Serialize)]
pub struct RankingStats {
    /// Number of candidates considered
    pub candidates_count: usize,
    /// Number of results returned
    pub results_count: usize,
    pub avg_score: f64,
    pub best_score: f64,
    /// Component that contributed most to the best result
    pub top_contributing_component: Option<&'static str>,
}

impl RankingStats {
    /// Compute stats from explained results, which must be sorted best first
    pub fn compute(results: &[ExplainedProduct], candidates_count: usize) -> Self {
        let Some(best) = results.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                top_contributing_component: None,
            };
        };

        let avg_score = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;

        Self {
            candidates_count,
            results_count: results.len(),
            avg_score,
            best_score: best.score,
            top_contributing_component: Some(best.explain.dominant()),
        }
    }
}
