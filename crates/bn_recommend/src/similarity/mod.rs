use bn_core::Article;
use tracing::{debug, warn};

pub mod tfidf;

pub use tfidf::{SparseVector, TermMatrix, TfIdfVectorizer, MAX_FEATURES};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position in the fitted document set
    pub index: usize,
    pub score: f64,
}

/// Cosine kNN over TF-IDF vectors of one candidate set. Built per query and
/// dropped with it; nothing here outlives the window it was fitted on.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    matrix: TermMatrix,
}

impl SimilarityIndex {
    pub fn build<S: AsRef<str>>(documents: &[S]) -> Self {
        Self::with_vectorizer(documents, TfIdfVectorizer::default())
    }

    pub fn with_vectorizer<S: AsRef<str>>(documents: &[S], vectorizer: TfIdfVectorizer) -> Self {
        Self {
            matrix: vectorizer.fit_transform(documents),
        }
    }

    pub fn len(&self) -> usize {
        self.matrix.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.rows.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.matrix.vocabulary.len()
    }

    /// Up to `limit` documents closest to `query`, excluding `query` itself.
    /// Equal scores keep document order.
    pub fn nearest(&self, query: usize, limit: usize) -> Vec<Neighbor> {
        let Some(target) = self.matrix.rows.get(query) else {
            return Vec::new();
        };
        let mut neighbors: Vec<Neighbor> = self
            .matrix
            .rows
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != query)
            .map(|(index, row)| Neighbor {
                index,
                score: target.cosine(row),
            })
            .collect();
        neighbors.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
        neighbors.truncate(limit);
        neighbors
    }
}

/// Rank the windowed candidates by textual similarity to the source, nearest first.
///
/// Retrieves `min(top_n * 3, candidates)` entries counting the source, then
/// drops the source, so at most `top_n * 3 - 1` neighbours come back. An
/// empty result means the source is missing from `candidates`.
pub fn similar_articles<'a>(candidates: &[&'a Article], source_article_id: i64, top_n: usize) -> Vec<&'a Article> {
    let Some(source_pos) = candidates.iter().position(|a| a.id == source_article_id) else {
        warn!(
            "Source article {} missing from its own time window ({} candidates)",
            source_article_id,
            candidates.len()
        );
        return Vec::new();
    };

    let texts: Vec<&str> = candidates.iter().map(|a| a.text_cleaned.as_str()).collect();
    let index = SimilarityIndex::build(&texts);
    let k = top_n.saturating_mul(3).min(candidates.len());
    let neighbors = index.nearest(source_pos, k.saturating_sub(1));

    debug!(
        "Similarity retrieval - source={}, candidates={}, vocabulary={}, neighbors={}",
        source_article_id,
        candidates.len(),
        index.vocabulary_len(),
        neighbors.len()
    );

    neighbors.into_iter().map(|n| candidates[n.index]).collect()
}
