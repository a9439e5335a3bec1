use std::collections::HashSet;

use bn_core::{Corpus, Error, Interaction, InteractionKind, Result, SourcedRecommendation};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::recommender::recommend;
use crate::RecommendationParams;

const FALLBACK_SOURCE_HEADLINE: &str = "an article you engaged with";

/// Rules deciding which interactions seed recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Reads shorter than this do not count as interest
    pub read_time_threshold_seconds: u32,
    /// Lookback used when a user has never received recommendations
    pub default_lookback_hours: i64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            read_time_threshold_seconds: 120,
            default_lookback_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSelection {
    /// Liked or long-read articles, first occurrence order
    pub sources: Vec<i64>,
    pub disliked: HashSet<i64>,
}

impl SourceSelection {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

pub fn select_sources(interactions: &[Interaction], policy: &PolicyConfig) -> SourceSelection {
    let mut selection = SourceSelection::default();
    let mut seen = HashSet::new();

    for interaction in interactions {
        let qualifies = match interaction.kind {
            InteractionKind::Like => true,
            InteractionKind::Read => interaction
                .read_time_seconds
                .is_some_and(|secs| secs >= policy.read_time_threshold_seconds),
            InteractionKind::Dislike => {
                selection.disliked.insert(interaction.news_id);
                false
            }
        };
        if qualifies && seen.insert(interaction.news_id) {
            selection.sources.push(interaction.news_id);
        }
    }
    selection
}

/// Run one query per qualifying source and merge the results.
///
/// Queries run in parallel over the shared corpus; output keeps source
/// order. Sources missing from the corpus are skipped, and disliked
/// articles never appear in the output.
pub fn recommend_for_interactions(
    corpus: &Corpus,
    interactions: &[Interaction],
    params: &RecommendationParams,
    policy: &PolicyConfig,
) -> Result<Vec<SourcedRecommendation>> {
    params.validate()?;
    let selection = select_sources(interactions, policy);
    if selection.is_empty() {
        return Err(Error::NoEligibleSources);
    }

    let per_source: Vec<Result<Vec<SourcedRecommendation>>> = selection
        .sources
        .par_iter()
        .map(|&source_id| {
            let result = match recommend(corpus, source_id, params) {
                Ok(result) => result,
                Err(Error::SourceNotFound(id)) => {
                    warn!("Skipping source article {}: not in corpus", id);
                    return Ok(Vec::new());
                }
                Err(e) => return Err(e),
            };
            let source_article_headline = corpus
                .get(source_id)
                .map(|a| a.headline.clone())
                .unwrap_or_else(|| FALLBACK_SOURCE_HEADLINE.to_string());
            Ok(result
                .articles
                .into_iter()
                .filter(|rec| !selection.disliked.contains(&rec.id))
                .map(|recommendation| SourcedRecommendation {
                    source_article_id: source_id,
                    source_article_headline: source_article_headline.clone(),
                    recommendation,
                })
                .collect())
        })
        .collect();

    let mut merged = Vec::new();
    for batch in per_source {
        merged.extend(batch?);
    }
    info!(
        "Generated {} recommendations from {} source articles ({} disliked excluded)",
        merged.len(),
        selection.sources.len(),
        selection.disliked.len()
    );
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::article;
    use bn_core::PoliticalLeaning::*;

    fn corpus() -> Corpus {
        let leanings = [Left, Center, Right];
        Corpus::new(
            (1..=12)
                .map(|id| {
                    article(
                        id,
                        id % 3,
                        leanings[(id % 3) as usize],
                        &format!("Outlet{}", id),
                        &format!("trade tariffs talks round {}", id % 4),
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_source_selection_rules() {
        let interactions = vec![
            Interaction::new(1, InteractionKind::Like),
            Interaction::read(2, 150),
            Interaction::read(3, 30),
            Interaction::new(4, InteractionKind::Dislike),
            Interaction::new(1, InteractionKind::Like),
            Interaction::new(5, InteractionKind::Read),
        ];
        let selection = select_sources(&interactions, &PolicyConfig::default());
        assert_eq!(selection.sources, vec![1, 2]);
        assert_eq!(selection.disliked, HashSet::from([4]));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let selection = select_sources(&[Interaction::read(9, 120)], &PolicyConfig::default());
        assert_eq!(selection.sources, vec![9]);
    }

    #[test]
    fn test_no_eligible_sources() {
        let interactions = vec![Interaction::new(4, InteractionKind::Dislike)];
        let err = recommend_for_interactions(
            &corpus(),
            &interactions,
            &RecommendationParams::default(),
            &PolicyConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NoEligibleSources));
    }

    #[test]
    fn test_disliked_articles_are_excluded() {
        let corpus = corpus();
        let params = RecommendationParams::default();
        let plain = recommend(&corpus, 1, &params).unwrap();
        let disliked = plain.articles[0].id;

        let interactions = vec![
            Interaction::new(1, InteractionKind::Like),
            Interaction::new(disliked, InteractionKind::Dislike),
        ];
        let records = recommend_for_interactions(&corpus, &interactions, &params, &PolicyConfig::default()).unwrap();
        assert_eq!(records.len(), plain.len() - 1);
        assert!(records.iter().all(|r| r.recommendation.id != disliked));
        assert!(records.iter().all(|r| r.source_article_id == 1));
        assert_eq!(records[0].source_article_headline, "Headline 1");
    }

    #[test]
    fn test_unknown_sources_are_skipped() {
        let interactions = vec![
            Interaction::new(999, InteractionKind::Like),
            Interaction::new(2, InteractionKind::Like),
        ];
        let records = recommend_for_interactions(
            &corpus(),
            &interactions,
            &RecommendationParams::default(),
            &PolicyConfig::default(),
        )
        .unwrap();
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| r.source_article_id == 2));
    }

    #[test]
    fn test_output_follows_source_order() {
        let interactions = vec![
            Interaction::new(7, InteractionKind::Like),
            Interaction::new(3, InteractionKind::Like),
        ];
        let records = recommend_for_interactions(
            &corpus(),
            &interactions,
            &RecommendationParams::default(),
            &PolicyConfig::default(),
        )
        .unwrap();
        let first_three = records.iter().position(|r| r.source_article_id == 3).unwrap();
        assert!(records[..first_three].iter().all(|r| r.source_article_id == 7));
    }
}
