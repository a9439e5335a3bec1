use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/articles/:id/recommendations", get(handlers::get_article_recommendations))
        .route("/api/users/:user_id/interactions", post(handlers::record_interaction))
        .route(
            "/api/users/:user_id/recommendations",
            get(handlers::list_recommendations).post(handlers::generate_recommendations),
        )
        .route("/api/users/:user_id/exposure", get(handlers::exposure_report))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{create_app, AppState};
    pub use bn_core::{Error, Result};
}
