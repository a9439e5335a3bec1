use std::sync::Arc;

use bn_core::{Corpus, InteractionStore};
use bn_recommend::{PolicyConfig, RecommendationParams, Recommender};
use bn_storage::InMemoryInteractionStore;

pub struct AppState {
    pub recommender: Recommender,
    pub store: Arc<dyn InteractionStore>,
    pub policy: PolicyConfig,
}

impl AppState {
    pub fn new(corpus: Arc<Corpus>, params: RecommendationParams, policy: PolicyConfig) -> Self {
        Self {
            recommender: Recommender::new(corpus).with_params(params),
            store: Arc::new(InMemoryInteractionStore::new()),
            policy,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn InteractionStore>) -> Self {
        self.store = store;
        self
    }
}
