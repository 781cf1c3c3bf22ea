//! Ranking configuration
//!
//! A small JSON document selecting the top list size and the score
//! weights. Every field is optional:
//!
//! ```json
//! { "top_n": 10, "weights": { "rating": 0.5, "price": 0.3, "rating_count": 0.2 } }
//! ```

use marketrank_core::{Error, Result};
use marketrank_ranking::{Ranker, ScoreWeights, DEFAULT_TOP_N};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default)]
    pub weights: ScoreWeights,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            weights: ScoreWeights::default(),
        }
    }
}

impl RankingConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        let mut config: RankingConfig = serde_json::from_slice(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&mut self) -> Result<()> {
        if self.top_n == 0 {
            return Err(Error::InvalidConfig("top_n must be at least 1".to_string()));
        }
        self.weights.validate_and_normalize()?;
        Ok(())
    }

    pub fn ranker(&self) -> Result<Ranker> {
        Ranker::with_weights(self.weights, self.top_n)
    }
}
