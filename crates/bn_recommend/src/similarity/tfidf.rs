use std::collections::{BTreeMap, HashMap, HashSet};

/// Vocabulary cap applied per fitted window.
pub const MAX_FEATURES: usize = 50_000;

/// L2-normalised sparse term vector, entries sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f64)>,
}

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    /// Cosine similarity; both sides are already unit length, so this is a dot product.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }
}

/// Term vectors for one fitted document set.
#[derive(Debug, Clone)]
pub struct TermMatrix {
    pub rows: Vec<SparseVector>,
    pub vocabulary: Vec<String>,
}

/// TF-IDF weighting: raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`,
/// rows normalised to unit length. The vocabulary keeps the `max_features`
/// terms with the highest total count (ties broken alphabetically).
#[derive(Debug, Clone, Copy)]
pub struct TfIdfVectorizer {
    max_features: usize,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new(MAX_FEATURES)
    }
}

impl TfIdfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> TermMatrix {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        // term -> (total count, document frequency)
        let mut stats: HashMap<&str, (u64, u64)> = HashMap::new();
        for tokens in &tokenized {
            let mut seen_here: HashSet<&str> = HashSet::new();
            for token in tokens {
                let entry = stats.entry(token.as_str()).or_insert((0, 0));
                entry.0 += 1;
                if seen_here.insert(token.as_str()) {
                    entry.1 += 1;
                }
            }
        }

        let mut ranked: Vec<(&str, u64, u64)> = stats.into_iter().map(|(t, (tf, df))| (t, tf, df)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        let n_docs = tokenized.len() as f64;
        let mut term_ids: HashMap<&str, u32> = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        let mut vocabulary = Vec::with_capacity(ranked.len());
        for (id, (term, _, df)) in ranked.iter().enumerate() {
            term_ids.insert(*term, id as u32);
            idf.push(((1.0 + n_docs) / (1.0 + *df as f64)).ln() + 1.0);
            vocabulary.push(term.to_string());
        }

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: BTreeMap<u32, f64> = BTreeMap::new();
                for token in tokens {
                    if let Some(&id) = term_ids.get(token.as_str()) {
                        *counts.entry(id).or_insert(0.0) += 1.0;
                    }
                }
                let mut entries: Vec<(u32, f64)> = counts
                    .into_iter()
                    .map(|(id, tf)| (id, tf * idf[id as usize]))
                    .collect();
                let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in entries.iter_mut() {
                        *w /= norm;
                    }
                }
                SparseVector { entries }
            })
            .collect();

        TermMatrix { rows, vocabulary }
    }
}

/// Lowercased word tokens of two or more characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(|t| t.to_lowercase())
        .collect()
}
