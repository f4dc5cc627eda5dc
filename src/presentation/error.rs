// HTTP error mapping
use crate::application::session::SessionError;
use crate::domain::date_range::DateRangeError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    BadRange(#[from] DateRangeError),
    #[error("unknown metric '{0}'")]
    UnknownMetric(String),
    #[error("no refresh has completed yet")]
    NotReady,
    #[error("upstream request failed: {0:#}")]
    Upstream(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Session(SessionError::AlreadyActive) => StatusCode::CONFLICT,
            ApiError::Session(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRange(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownMetric(_) => StatusCode::NOT_FOUND,
            ApiError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
