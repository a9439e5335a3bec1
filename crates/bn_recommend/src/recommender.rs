use std::sync::Arc;

use bn_core::{Article, Corpus, Recommendation, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::diversity::enforce_political_diversity;
use crate::fairness::fairness_re_rank;
use crate::similarity::similar_articles;
use crate::window::select_window;
use crate::RecommendationParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankQuality {
    /// Full pipeline: similarity, leaning quotas, outlet cap
    Ranked,
    /// Too few articles near the source date; window rows in corpus order
    Degraded,
    /// Nothing to recommend
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub quality: RankQuality,
    #[serde(rename = "recommendations")]
    pub articles: Vec<Recommendation>,
}

impl Recommendations {
    pub fn empty() -> Self {
        Self {
            quality: RankQuality::Empty,
            articles: Vec::new(),
        }
    }

    fn from_articles(quality: RankQuality, articles: &[&Article]) -> Self {
        Self {
            quality,
            articles: articles.iter().map(|a| Recommendation::from(*a)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Recommend articles similar to one source article, balanced across
/// political leanings and capped per outlet.
///
/// Stages: time window, TF-IDF similarity, leaning quotas, outlet cap,
/// truncation to `top_n`. A window smaller than `top_n` short-circuits to
/// its own rows, unranked. Unknown ids are `SourceNotFound` unless the
/// corpus is empty, which yields an empty result.
pub fn recommend(corpus: &Corpus, source_article_id: i64, params: &RecommendationParams) -> Result<Recommendations> {
    params.validate()?;

    if corpus.is_empty() {
        debug!("Empty corpus, nothing to recommend for {}", source_article_id);
        return Ok(Recommendations::empty());
    }

    let window = select_window(
        corpus,
        source_article_id,
        params.base_days_window,
        params.max_days_window,
        params.min_candidates(),
    )?;
    let candidates: Vec<&Article> = window.candidates.iter().map(|&pos| &corpus.articles()[pos]).collect();

    if candidates.len() < params.top_n {
        info!(
            "Sparse window for {} ({} articles within {} days), returning degraded result",
            source_article_id,
            candidates.len(),
            window.days
        );
        let head: Vec<&Article> = candidates.into_iter().take(params.top_n).collect();
        return Ok(Recommendations::from_articles(RankQuality::Degraded, &head));
    }

    let similar = similar_articles(&candidates, source_article_id, params.top_n);
    if similar.is_empty() {
        return Ok(Recommendations::empty());
    }

    let diverse = enforce_political_diversity(&similar, params.primary_weight, params.top_n);
    let mut balanced = fairness_re_rank(&diverse, params.max_per_outlet);
    balanced.truncate(params.top_n);

    info!(
        "Recommended {} articles for {} (window={}d, candidates={}, neighbors={})",
        balanced.len(),
        source_article_id,
        window.days,
        candidates.len(),
        similar.len()
    );

    Ok(Recommendations::from_articles(RankQuality::Ranked, &balanced))
}

/// Shared handle over a corpus snapshot with default parameters.
#[derive(Debug, Clone)]
pub struct Recommender {
    corpus: Arc<Corpus>,
    params: RecommendationParams,
}

impl Recommender {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self {
            corpus,
            params: RecommendationParams::default(),
        }
    }

    pub fn with_params(mut self, params: RecommendationParams) -> Self {
        self.params = params;
        self
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    pub fn params(&self) -> &RecommendationParams {
        &self.params
    }

    pub fn recommend(&self, source_article_id: i64) -> Result<Recommendations> {
        recommend(&self.corpus, source_article_id, &self.params)
    }

    pub fn recommend_with(&self, source_article_id: i64, params: &RecommendationParams) -> Result<Recommendations> {
        recommend(&self.corpus, source_article_id, params)
    }
}
