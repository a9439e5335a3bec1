use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PoliticalLeaning {
    Left,
    Center,
    Right,
}

impl PoliticalLeaning {
    pub const ALL: [PoliticalLeaning; 3] = [Self::Left, Self::Center, Self::Right];

    /// The two other leanings, in quota order. CENTER is the first
    /// secondary for both wings; CENTER itself falls back to LEFT, RIGHT.
    pub fn secondaries(self) -> [PoliticalLeaning; 2] {
        match self {
            Self::Left => [Self::Center, Self::Right],
            Self::Right => [Self::Center, Self::Left],
            Self::Center => [Self::Left, Self::Right],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Center => "CENTER",
            Self::Right => "RIGHT",
        }
    }
}

impl fmt::Display for PoliticalLeaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoliticalLeaning {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LEFT" => Ok(Self::Left),
            "CENTER" => Ok(Self::Center),
            "RIGHT" => Ok(Self::Right),
            _ => Err(Error::UnknownLeaning(s.to_string())),
        }
    }
}

/// One row of the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub date_publish: NaiveDateTime,
    pub headline: String,
    pub outlet: String,
    pub url: String,
    pub political_leaning: PoliticalLeaning,
    pub text_cleaned: String,
}

impl Article {
    /// Calendar day used for time windowing
    pub fn publish_day(&self) -> NaiveDate {
        self.date_publish.date()
    }
}

/// Display record handed back to callers. Carries no article body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: i64,
    pub date_publish: NaiveDateTime,
    pub headline: String,
    pub outlet: String,
    pub url: String,
    pub political_leaning: PoliticalLeaning,
}

impl From<&Article> for Recommendation {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id,
            date_publish: article.date_publish,
            headline: article.headline.clone(),
            outlet: article.outlet.clone(),
            url: article.url.clone(),
            political_leaning: article.political_leaning,
        }
    }
}

/// A recommendation tied to the article that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcedRecommendation {
    pub source_article_id: i64,
    pub source_article_headline: String,
    #[serde(flatten)]
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Like,
    Dislike,
    Read,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub news_id: i64,
    #[serde(rename = "interaction_type")]
    pub kind: InteractionKind,
    #[serde(default)]
    pub read_time_seconds: Option<u32>,
    #[serde(default = "Utc::now")]
    pub at: DateTime<Utc>,
}

impl Interaction {
    pub fn new(news_id: i64, kind: InteractionKind) -> Self {
        Self {
            news_id,
            kind,
            read_time_seconds: None,
            at: Utc::now(),
        }
    }

    pub fn read(news_id: i64, seconds: u32) -> Self {
        Self {
            read_time_seconds: Some(seconds),
            ..Self::new(news_id, InteractionKind::Read)
        }
    }
}
