use bn_core::{Article, PoliticalLeaning};
use chrono::{NaiveDate, NaiveDateTime};

pub fn day(offset: i64) -> NaiveDateTime {
    let base = NaiveDate::from_ymd_opt(2019, 6, 1)
        .and_then(|d| d.and_hms_opt(8, 30, 0))
        .unwrap();
    base + chrono::Duration::days(offset)
}

pub fn article(id: i64, offset: i64, leaning: PoliticalLeaning, outlet: &str, text: &str) -> Article {
    Article {
        id,
        date_publish: day(offset),
        headline: format!("Headline {}", id),
        outlet: outlet.to_string(),
        url: format!("https://news.example/{}", id),
        political_leaning: leaning,
        text_cleaned: text.to_string(),
    }
}
