use std::collections::BTreeMap;

use bn_core::{PoliticalLeaning, Recommendation};
use serde::{Deserialize, Serialize};

/// Leaning and outlet breakdown of a set of recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureReport {
    pub total: usize,
    pub by_leaning: BTreeMap<PoliticalLeaning, usize>,
    pub by_outlet: BTreeMap<String, usize>,
    /// Most represented leaning; ties go to the earlier of LEFT, CENTER, RIGHT
    pub dominant_leaning: Option<PoliticalLeaning>,
    /// Fraction of `total` held by `dominant_leaning`, 0.0 when empty
    pub dominant_share: f64,
}

impl ExposureReport {
    pub fn from_recommendations<'a, I>(recommendations: I) -> Self
    where
        I: IntoIterator<Item = &'a Recommendation>,
    {
        let mut by_leaning: BTreeMap<PoliticalLeaning, usize> =
            PoliticalLeaning::ALL.iter().map(|&l| (l, 0)).collect();
        let mut by_outlet = BTreeMap::new();
        let mut total = 0;

        for rec in recommendations {
            total += 1;
            *by_leaning.entry(rec.political_leaning).or_insert(0) += 1;
            *by_outlet.entry(rec.outlet.clone()).or_insert(0) += 1;
        }

        let dominant = PoliticalLeaning::ALL
            .iter()
            .map(|l| (*l, by_leaning[l]))
            .fold(None, |best: Option<(PoliticalLeaning, usize)>, (l, n)| match best {
                Some((_, top)) if top >= n => best,
                _ if n > 0 => Some((l, n)),
                _ => best,
            });

        Self {
            total,
            by_leaning,
            by_outlet,
            dominant_leaning: dominant.map(|(l, _)| l),
            dominant_share: dominant.map_or(0.0, |(_, n)| n as f64 / total as f64),
        }
    }
}
