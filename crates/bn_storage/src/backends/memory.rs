use async_trait::async_trait;
use bn_core::{Interaction, InteractionStore, Result, SourcedRecommendation};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct UserRecord {
    interactions: Vec<Interaction>,
    recommendations: Vec<SourcedRecommendation>,
    last_recommendation_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: HashMap<i64, UserRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_interaction(&mut self, user_id: i64, interaction: Interaction) {
        self.users.entry(user_id).or_default().interactions.push(interaction);
    }

    pub fn interactions_since(&self, user_id: i64, since: DateTime<Utc>) -> Vec<Interaction> {
        let mut found: Vec<Interaction> = self
            .users
            .get(&user_id)
            .map(|u| u.interactions.iter().filter(|i| i.at > since).cloned().collect())
            .unwrap_or_default();
        found.sort_by_key(|i| i.at);
        found
    }

    pub fn store_recommendations(&mut self, user_id: i64, records: &[SourcedRecommendation], at: DateTime<Utc>) {
        let user = self.users.entry(user_id).or_default();
        user.recommendations.extend_from_slice(records);
        user.last_recommendation_at = Some(at);
    }
}

/// Process-local interaction store. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInteractionStore {
    store: Arc<RwLock<MemoryStore>>,
}

impl InMemoryInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InteractionStore for InMemoryInteractionStore {
    async fn record_interaction(&self, user_id: i64, interaction: Interaction) -> Result<()> {
        let mut store = self.store.write().await;
        store.record_interaction(user_id, interaction);
        Ok(())
    }

    async fn interactions_since(&self, user_id: i64, since: DateTime<Utc>) -> Result<Vec<Interaction>> {
        let store = self.store.read().await;
        Ok(store.interactions_since(user_id, since))
    }

    async fn last_recommendation_at(&self, user_id: i64) -> Result<Option<DateTime<Utc>>> {
        let store = self.store.read().await;
        Ok(store.users.get(&user_id).and_then(|u| u.last_recommendation_at))
    }

    async fn store_recommendations(
        &self,
        user_id: i64,
        records: &[SourcedRecommendation],
        at: DateTime<Utc>,
    ) -> Result<()> {
        let mut store = self.store.write().await;
        store.store_recommendations(user_id, records, at);
        Ok(())
    }

    async fn recommendations(&self, user_id: i64) -> Result<Vec<SourcedRecommendation>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .get(&user_id)
            .map(|u| u.recommendations.clone())
            .unwrap_or_default())
    }
}
