use std::collections::HashMap;

use bn_core::{Article, Corpus, PoliticalLeaning};
use bn_recommend::diversity::enforce_political_diversity;
use bn_recommend::window::select_window;
use bn_recommend::{recommend, RankQuality, RecommendationParams};
use chrono::NaiveDate;
use proptest::prelude::*;
use proptest::sample::Index;

const WORDS: [&str; 8] = [
    "election", "budget", "senate", "climate", "court", "markets", "border", "vaccine",
];
const LEANINGS: [PoliticalLeaning; 3] = [
    PoliticalLeaning::Left,
    PoliticalLeaning::Center,
    PoliticalLeaning::Right,
];

type Row = (i64, usize, usize, Vec<usize>);

fn build_corpus(rows: &[Row]) -> Corpus {
    let epoch = NaiveDate::from_ymd_opt(2020, 3, 1)
        .and_then(|d| d.and_hms_opt(6, 0, 0))
        .unwrap();
    let articles = rows
        .iter()
        .enumerate()
        .map(|(i, (offset, leaning, outlet, words))| Article {
            id: i as i64 * 10 + 1,
            date_publish: epoch + chrono::Duration::days(*offset),
            headline: format!("headline {}", i),
            outlet: format!("outlet-{}", outlet),
            url: format!("https://news.example/{}", i),
            political_leaning: LEANINGS[*leaning],
            text_cleaned: words.iter().map(|w| WORDS[*w]).collect::<Vec<_>>().join(" "),
        })
        .collect();
    Corpus::new(articles).unwrap()
}

fn rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (0i64..25, 0usize..3, 0usize..4, prop::collection::vec(0usize..8, 0..6)),
        1..35,
    )
}

fn params() -> impl Strategy<Value = RecommendationParams> {
    (1usize..8, 0usize..8, 0u32..6, 0u32..6, 1usize..4).prop_map(|(top_n, pw, base, extra, cap)| {
        RecommendationParams {
            primary_weight: pw.min(top_n),
            top_n,
            base_days_window: base,
            max_days_window: base + extra,
            max_per_outlet: cap,
        }
    })
}

proptest! {
    #[test]
    fn result_never_exceeds_top_n(rows in rows(), pick in any::<Index>(), params in params()) {
        let corpus = build_corpus(&rows);
        let source = corpus.articles()[pick.index(corpus.len())].id;
        let result = recommend(&corpus, source, &params).unwrap();
        prop_assert!(result.len() <= params.top_n);
    }

    #[test]
    fn ranked_results_respect_outlet_cap_and_skip_source(rows in rows(), pick in any::<Index>(), params in params()) {
        let corpus = build_corpus(&rows);
        let source = corpus.articles()[pick.index(corpus.len())].id;
        let result = recommend(&corpus, source, &params).unwrap();
        if result.quality == RankQuality::Ranked {
            prop_assert!(result.articles.iter().all(|a| a.id != source));
            let mut per_outlet: HashMap<&str, usize> = HashMap::new();
            for rec in &result.articles {
                *per_outlet.entry(rec.outlet.as_str()).or_default() += 1;
            }
            prop_assert!(per_outlet.values().all(|&n| n <= params.max_per_outlet));
        }
    }

    #[test]
    fn identical_requests_give_identical_results(rows in rows(), pick in any::<Index>(), params in params()) {
        let corpus = build_corpus(&rows);
        let source = corpus.articles()[pick.index(corpus.len())].id;
        let first = recommend(&corpus, source, &params).unwrap();
        let second = recommend(&corpus, source, &params).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn window_stays_within_max(rows in rows(), pick in any::<Index>(), params in params()) {
        let corpus = build_corpus(&rows);
        let source = corpus.articles()[pick.index(corpus.len())].clone();
        let window = select_window(
            &corpus,
            source.id,
            params.base_days_window,
            params.max_days_window,
            params.min_candidates(),
        ).unwrap();
        prop_assert!(window.days <= params.max_days_window);
        for &pos in &window.candidates {
            let distance = (corpus.articles()[pos].publish_day() - source.publish_day()).num_days().abs();
            prop_assert!(distance <= i64::from(window.days));
        }
    }

    #[test]
    fn primary_leaning_gets_its_quota(rows in rows(), params in params()) {
        let corpus = build_corpus(&rows);
        let pool: Vec<&Article> = corpus.articles().iter().collect();
        let out = enforce_political_diversity(&pool, params.primary_weight, params.top_n);
        prop_assert_eq!(out.len(), params.top_n.min(pool.len()));

        let primary = pool[0].political_leaning;
        let available = pool.iter().filter(|a| a.political_leaning == primary).count();
        let chosen = out.iter().filter(|a| a.political_leaning == primary).count();
        prop_assert!(chosen >= params.primary_weight.min(available));
    }
}
