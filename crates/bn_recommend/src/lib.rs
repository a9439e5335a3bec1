use bn_core::{Error, Result};
use serde::{Deserialize, Serialize};

pub mod diversity;
pub mod fairness;
pub mod policy;
pub mod recommender;
pub mod report;
pub mod similarity;
pub mod window;

#[cfg(test)]
pub(crate) mod test_utils;

/// Tunables for a single recommendation query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationParams {
    /// Slots reserved for the leaning of the nearest neighbour
    pub primary_weight: usize,
    pub top_n: usize,
    pub base_days_window: u32,
    pub max_days_window: u32,
    pub max_per_outlet: usize,
}

impl Default for RecommendationParams {
    fn default() -> Self {
        Self {
            primary_weight: 2,
            top_n: 5,
            base_days_window: 5,
            max_days_window: 10,
            max_per_outlet: fairness::DEFAULT_MAX_PER_OUTLET,
        }
    }
}

impl RecommendationParams {
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(Error::InvalidParameters("top_n must be at least 1".to_string()));
        }
        if self.top_n.checked_mul(3).is_none() {
            return Err(Error::InvalidParameters(format!("top_n ({}) is too large", self.top_n)));
        }
        if self.primary_weight > self.top_n {
            return Err(Error::InvalidParameters(format!(
                "primary_weight ({}) cannot exceed top_n ({})",
                self.primary_weight, self.top_n
            )));
        }
        if self.base_days_window > self.max_days_window {
            return Err(Error::InvalidParameters(format!(
                "base_days_window ({}) cannot exceed max_days_window ({})",
                self.base_days_window, self.max_days_window
            )));
        }
        if self.max_per_outlet == 0 {
            return Err(Error::InvalidParameters("max_per_outlet must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Candidate count the time window tries to reach before ranking
    pub fn min_candidates(&self) -> usize {
        self.top_n.saturating_mul(3)
    }
}

pub use policy::{recommend_for_interactions, select_sources, PolicyConfig, SourceSelection};
pub use recommender::{recommend, RankQuality, Recommendations, Recommender};
pub use report::ExposureReport;

pub mod prelude {
    pub use super::{recommend, RankQuality, RecommendationParams, Recommendations, Recommender};
    pub use bn_core::{Article, Corpus, Error, PoliticalLeaning, Recommendation, Result};
}
