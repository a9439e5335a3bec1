use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bn_core::Error;
use serde_json::json;
use tracing::error;

/// Maps core errors onto HTTP statuses.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self(Error::External(err.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::SourceNotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidParameters(_) | Error::NoEligibleSources => StatusCode::BAD_REQUEST,
            other => {
                error!("Request failed: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
