pub mod corpus;
pub mod error;
pub mod storage;
pub mod types;

pub use corpus::Corpus;
pub use error::{Error, Result};
pub use storage::InteractionStore;
pub use types::{
    Article, Interaction, InteractionKind, PoliticalLeaning, Recommendation,
    SourcedRecommendation,
};

pub mod prelude {
    pub use super::{Article, Corpus, Error, PoliticalLeaning, Recommendation, Result};
}
