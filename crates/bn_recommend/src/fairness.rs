use std::collections::HashMap;

use bn_core::Article;
use tracing::debug;

pub const DEFAULT_MAX_PER_OUTLET: usize = 2;

/// Keep entries in order while an outlet is under its cap; later entries
/// from a capped outlet are dropped for good.
pub fn fairness_re_rank<'a>(ranked: &[&'a Article], max_per_outlet: usize) -> Vec<&'a Article> {
    let mut outlet_counts: HashMap<&str, usize> = HashMap::new();
    let mut balanced = Vec::with_capacity(ranked.len());

    for article in ranked {
        let count = outlet_counts.entry(article.outlet.as_str()).or_insert(0);
        if *count < max_per_outlet {
            *count += 1;
            balanced.push(*article);
        }
    }

    if balanced.len() < ranked.len() {
        debug!(
            "Outlet cap dropped {} of {} entries (max_per_outlet={})",
            ranked.len() - balanced.len(),
            ranked.len(),
            max_per_outlet
        );
    }
    balanced
}
