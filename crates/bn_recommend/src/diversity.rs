use bn_core::{Article, PoliticalLeaning};
use tracing::debug;

/// Minimum slot counts in processing order: primary, then its two secondaries.
/// The first secondary absorbs the division remainder.
pub fn leaning_quotas(primary: PoliticalLeaning, primary_weight: usize, top_n: usize) -> Vec<(PoliticalLeaning, usize)> {
    let per_secondary = top_n.saturating_sub(primary_weight) / 2;
    let [first, second] = primary.secondaries();
    vec![
        (primary, primary_weight),
        (first, per_secondary + 1),
        (second, per_secondary),
    ]
}

/// Reorder similarity-ranked candidates so every leaning gets its quota.
///
/// The primary leaning is that of the nearest candidate. Each leaning in
/// quota order takes its best remaining candidates; any slots still open
/// are then filled from what is left in similarity order. Never returns
/// more than `top_n` entries.
pub fn enforce_political_diversity<'a>(ranked: &[&'a Article], primary_weight: usize, top_n: usize) -> Vec<&'a Article> {
    let Some(nearest) = ranked.first() else {
        return Vec::new();
    };

    let quotas = leaning_quotas(nearest.political_leaning, primary_weight, top_n);
    let mut taken = vec![false; ranked.len()];
    let mut selected = Vec::with_capacity(top_n.min(ranked.len()));

    for (leaning, quota) in &quotas {
        let room = top_n.saturating_sub(selected.len());
        let picks: Vec<usize> = ranked
            .iter()
            .enumerate()
            .filter(|(pos, a)| !taken[*pos] && a.political_leaning == *leaning)
            .map(|(pos, _)| pos)
            .take((*quota).min(room))
            .collect();
        for pos in picks {
            taken[pos] = true;
            selected.push(ranked[pos]);
        }
    }

    let from_quotas = selected.len();
    for (pos, article) in ranked.iter().enumerate() {
        if selected.len() >= top_n {
            break;
        }
        if !taken[pos] {
            taken[pos] = true;
            selected.push(*article);
        }
    }

    debug!(
        "Diversity quotas - primary={}, quotas={:?}, from_quotas={}, backfilled={}",
        nearest.political_leaning,
        quotas,
        from_quotas,
        selected.len() - from_quotas
    );

    selected
}
