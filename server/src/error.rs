use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calendar::CalendarError;
use serde_json::json;
use store::StoreError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Too many requests")]
    TooManyRequests,

    #[error("database error: {0}")]
    Database(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Codec rejections travel into 400 bodies with their message text unchanged.
impl From<CalendarError> for ApiError {
    fn from(err: CalendarError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            ApiError::Database(_) | ApiError::Internal(_) => {
                error!("{self}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": {
                "message": message,
                "status": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}
