use bn_core::{Corpus, Error, Result};
use chrono::NaiveDate;
use tracing::debug;

/// Outcome of adaptive time windowing around a source article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub reference_day: NaiveDate,
    /// Final half-width in days, never above the requested maximum
    pub days: u32,
    /// Corpus positions inside `[reference_day - days, reference_day + days]`, in corpus order
    pub candidates: Vec<usize>,
}

impl TimeWindow {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Widen a symmetric day window around the source until it holds
/// `min_candidates` articles or reaches `max_days`.
pub fn select_window(
    corpus: &Corpus,
    source_article_id: i64,
    base_days: u32,
    max_days: u32,
    min_candidates: usize,
) -> Result<TimeWindow> {
    let source = corpus
        .get(source_article_id)
        .ok_or(Error::SourceNotFound(source_article_id))?;
    let reference_day = source.publish_day();

    let distances: Vec<u64> = corpus
        .articles()
        .iter()
        .map(|a| (a.publish_day() - reference_day).num_days().unsigned_abs())
        .collect();
    let count_within = |days: u32| distances.iter().filter(|&&d| d <= u64::from(days)).count();

    let mut days = base_days.min(max_days);
    let mut count = count_within(days);
    while count < min_candidates && days < max_days {
        days += 1;
        count = count_within(days);
    }

    debug!(
        "Time window - source={}, reference_day={}, days={}, candidates={}, wanted={}",
        source_article_id, reference_day, days, count, min_candidates
    );

    let candidates = distances
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d <= u64::from(days))
        .map(|(pos, _)| pos)
        .collect();

    Ok(TimeWindow {
        reference_day,
        days,
        candidates,
    })
}
