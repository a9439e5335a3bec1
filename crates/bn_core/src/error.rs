use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Source article not found: {0}")]
    SourceNotFound(i64),

    #[error("Duplicate article id in corpus: {0}")]
    DuplicateArticle(i64),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("No valid articles for recommendations. Try liking or reading some articles first.")]
    NoEligibleSources,

    #[error("Unknown political leaning: {0}")]
    UnknownLeaning(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
