use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::types::{Interaction, SourcedRecommendation};
use crate::Result;

/// Persistence seam for per-user interaction history and past recommendations.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Record one interaction for a user
    async fn record_interaction(&self, user_id: i64, interaction: Interaction) -> Result<()>;

    /// Interactions recorded strictly after `since`, oldest first
    async fn interactions_since(&self, user_id: i64, since: DateTime<Utc>) -> Result<Vec<Interaction>>;

    /// When recommendations were last generated for the user, if ever
    async fn last_recommendation_at(&self, user_id: i64) -> Result<Option<DateTime<Utc>>>;

    /// Append a batch of recommendations and advance the user's timestamp to `at`
    async fn store_recommendations(
        &self,
        user_id: i64,
        records: &[SourcedRecommendation],
        at: DateTime<Utc>,
    ) -> Result<()>;

    /// Every recommendation stored for the user, in insertion order
    async fn recommendations(&self, user_id: i64) -> Result<Vec<SourcedRecommendation>>;
}
