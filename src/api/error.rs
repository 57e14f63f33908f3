use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use thiserror::Error;

use super::response::Envelope;

/// API error taxonomy. Every variant renders as the failure envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    InvalidField(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn plant_not_found(id: i64) -> Self {
        Self::NotFound(format!("plant with id {id} not found"))
    }

    pub fn event_not_found(id: i64) -> Self {
        Self::NotFound(format!("care event with id {id} not found"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingField(_) | ApiError::InvalidField(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            // The real error is logged server-side; clients only see a
            // generic message.
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(Envelope::failure(message))).into_response()
    }
}
