use std::path::Path;

use bn_core::{Article, Corpus, PoliticalLeaning, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::{info, warn};

/// Corpus row as found on disk, before validation. Every field but `id`
/// may be missing or null; `validate` decides what is usable.
#[derive(Debug, Deserialize)]
struct RawArticle {
    id: i64,
    #[serde(default)]
    date_publish: Option<String>,
    #[serde(default)]
    headline: Option<String>,
    #[serde(default)]
    outlet: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    political_leaning: Option<String>,
    #[serde(default)]
    text_cleaned: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Load a corpus from a JSON array file or a JSON Lines file.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<(Corpus, LoadReport)> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let (corpus, report) = parse_corpus(&contents)?;
    info!(
        "Loaded corpus from {} - articles={}, skipped={}",
        path.display(),
        report.loaded,
        report.skipped
    );
    Ok((corpus, report))
}

pub fn parse_corpus(contents: &str) -> Result<(Corpus, LoadReport)> {
    let raw: Vec<RawArticle> = if contents.trim_start().starts_with('[') {
        serde_json::from_str(contents)?
    } else {
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str::<RawArticle>)
            .collect::<std::result::Result<Vec<_>, _>>()?
    };

    let mut report = LoadReport::default();
    let mut articles = Vec::with_capacity(raw.len());
    for row in raw {
        match validate(row) {
            Ok(article) => articles.push(article),
            Err((id, reason)) => {
                warn!("Skipping corpus row {}: {}", id, reason);
                report.skipped += 1;
            }
        }
    }
    report.loaded = articles.len();
    Ok((Corpus::new(articles)?, report))
}

fn validate(row: RawArticle) -> std::result::Result<Article, (i64, String)> {
    let date_publish = row
        .date_publish
        .as_deref()
        .and_then(parse_publish_date)
        .ok_or_else(|| (row.id, format!("unparseable date_publish {:?}", row.date_publish)))?;
    let political_leaning: PoliticalLeaning = row
        .political_leaning
        .as_deref()
        .and_then(|l| l.parse().ok())
        .ok_or_else(|| (row.id, format!("unknown political_leaning {:?}", row.political_leaning)))?;
    let text_cleaned = row
        .text_cleaned
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| (row.id, "empty text_cleaned".to_string()))?;

    Ok(Article {
        id: row.id,
        date_publish,
        headline: row.headline.unwrap_or_default(),
        outlet: row.outlet.unwrap_or_default(),
        url: row.url.unwrap_or_default(),
        political_leaning,
        text_cleaned,
    })
}

fn parse_publish_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_utc()))
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bn_core::Error;
    use std::io::Write;

    const ROWS: &str = r#"
{"id": 1, "date_publish": "2019-06-01 10:15:00", "headline": "A", "outlet": "Guardian", "url": "u1", "political_leaning": "LEFT", "text_cleaned": "budget vote"}
{"id": 2, "date_publish": "2019-06-02", "headline": "B", "outlet": "Fox", "url": "u2", "political_leaning": "right", "text_cleaned": "border talks"}

{"id": 3, "date_publish": "not a date", "headline": "C", "outlet": "AP", "url": "u3", "political_leaning": "CENTER", "text_cleaned": "x y"}
{"id": 4, "date_publish": "2019-06-03T08:00:00Z", "headline": "D", "outlet": "AP", "url": "u4", "political_leaning": "CENTER", "text_cleaned": "   "}
{"id": 5, "date_publish": "2019-06-03T08:00:00+02:00", "headline": "E", "outlet": "AP", "url": "u5", "political_leaning": "CENTER", "text_cleaned": "markets"}
"#;

    #[test]
    fn test_jsonl_with_invalid_rows() {
        let (corpus, report) = parse_corpus(ROWS).unwrap();
        assert_eq!(report, LoadReport { loaded: 3, skipped: 2 });
        assert_eq!(corpus.articles().iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2, 5]);
        assert_eq!(corpus.get(2).unwrap().political_leaning, PoliticalLeaning::Right);
        assert_eq!(corpus.get(5).unwrap().date_publish.to_string(), "2019-06-03 06:00:00");
    }

    #[test]
    fn test_json_array_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 9, "date_publish": "2020-01-01 00:00:00", "political_leaning": "CENTER", "text_cleaned": "hello world"}}]"#
        )
        .unwrap();
        let (corpus, report) = load_corpus(file.path()).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(corpus.get(9).unwrap().outlet, "");
    }

    #[test]
    fn test_null_fields_skip_the_row() {
        let rows = r#"[
            {"id": 1, "date_publish": "2020-01-01", "political_leaning": "LEFT", "text_cleaned": "a b"},
            {"id": 2, "date_publish": null, "political_leaning": "LEFT", "text_cleaned": "c d"},
            {"id": 3, "date_publish": "2020-01-02", "political_leaning": null, "text_cleaned": "e f"},
            {"id": 4, "date_publish": "2020-01-02", "political_leaning": "RIGHT", "outlet": null, "headline": null, "url": null, "text_cleaned": "g h"}
        ]"#;
        let (corpus, report) = parse_corpus(rows).unwrap();
        assert_eq!(report, LoadReport { loaded: 2, skipped: 2 });
        assert_eq!(corpus.articles().iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(corpus.get(4).unwrap().outlet, "");
    }

    #[test]
    fn test_duplicate_ids_fail() {
        let rows = r#"[
            {"id": 1, "date_publish": "2020-01-01", "political_leaning": "LEFT", "text_cleaned": "a b"},
            {"id": 1, "date_publish": "2020-01-02", "political_leaning": "LEFT", "text_cleaned": "c d"}
        ]"#;
        assert!(matches!(parse_corpus(rows), Err(Error::DuplicateArticle(1))));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(parse_corpus("{not json"), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(load_corpus("/nonexistent/corpus.json"), Err(Error::Io(_))));
    }
}
