use std::collections::HashMap;

use crate::types::Article;
use crate::{Error, Result};

/// Read-only article table, in load order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    articles: Vec<Article>,
    index: HashMap<i64, usize>,
}

impl Corpus {
    pub fn new(articles: Vec<Article>) -> Result<Self> {
        let mut index = HashMap::with_capacity(articles.len());
        for (pos, article) in articles.iter().enumerate() {
            if index.insert(article.id, pos).is_some() {
                return Err(Error::DuplicateArticle(article.id));
            }
        }
        Ok(Self { articles, index })
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn get(&self, id: i64) -> Option<&Article> {
        self.position(id).map(|pos| &self.articles[pos])
    }

    pub fn position(&self, id: i64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
