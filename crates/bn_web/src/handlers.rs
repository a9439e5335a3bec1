use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bn_core::{Interaction, SourcedRecommendation};
use bn_recommend::{recommend_for_interactions, ExposureReport, RecommendationParams};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Per-request overrides of the configured recommendation parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ParamOverrides {
    pub primary_weight: Option<usize>,
    pub top_n: Option<usize>,
    pub base_days_window: Option<u32>,
    pub max_days_window: Option<u32>,
    pub max_per_outlet: Option<usize>,
}

impl ParamOverrides {
    pub fn apply(&self, base: &RecommendationParams) -> RecommendationParams {
        RecommendationParams {
            primary_weight: self.primary_weight.unwrap_or(base.primary_weight),
            top_n: self.top_n.unwrap_or(base.top_n),
            base_days_window: self.base_days_window.unwrap_or(base.base_days_window),
            max_days_window: self.max_days_window.unwrap_or(base.max_days_window),
            max_per_outlet: self.max_per_outlet.unwrap_or(base.max_per_outlet),
        }
    }
}

pub async fn get_article_recommendations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(overrides): Query<ParamOverrides>,
) -> Result<impl IntoResponse, ApiError> {
    let params = overrides.apply(state.recommender.params());
    let recommender = state.recommender.clone();
    let result = tokio::task::spawn_blocking(move || recommender.recommend_with(id, &params)).await??;
    Ok(Json(result))
}

pub async fn record_interaction(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(interaction): Json<Interaction>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.record_interaction(user_id, interaction).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

pub async fn generate_recommendations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let records = run_for_user(&state, user_id, Utc::now()).await?;
    Ok(Json(json!({ "success": true, "recommendations": records })))
}

/// One recommendation run for `user_id`, stamped with `now`.
///
/// `now` is read before interactions are fetched, so anything recorded while
/// the run is in flight falls after the stored stamp and feeds the next run.
pub(crate) async fn run_for_user(
    state: &AppState,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<Vec<SourcedRecommendation>, ApiError> {
    let since = match state.store.last_recommendation_at(user_id).await? {
        Some(last) => last,
        None => now - Duration::hours(state.policy.default_lookback_hours),
    };
    let interactions = state.store.interactions_since(user_id, since).await?;

    let corpus = state.recommender.corpus().clone();
    let params = state.recommender.params().clone();
    let policy = state.policy.clone();
    let records = tokio::task::spawn_blocking(move || {
        recommend_for_interactions(&corpus, &interactions, &params, &policy)
    })
    .await??;

    state.store.store_recommendations(user_id, &records, now).await?;
    info!("Stored {} recommendations for user {}", records.len(), user_id);
    Ok(records)
}

pub async fn list_recommendations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<SourcedRecommendation>>, ApiError> {
    Ok(Json(state.store.recommendations(user_id).await?))
}

pub async fn exposure_report(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<ExposureReport>, ApiError> {
    let records = state.store.recommendations(user_id).await?;
    Ok(Json(ExposureReport::from_recommendations(
        records.iter().map(|r| &r.recommendation),
    )))
}
