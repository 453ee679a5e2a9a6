//! Error responses.
//!
//! Every failure leaves the API as `{"error": "<message>"}` with the status
//! that matches its `DomainError` variant. Internal failures are logged in
//! full and answered with the route's generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::DomainError;
use serde::Serialize;

const GENERIC_INTERNAL: &str = "Internal Server Error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Maps a domain failure, using `internal_message` in place of the
    /// detail of an `Internal` error.
    pub fn from_domain(err: DomainError, internal_message: &str) -> Self {
        let status = match &err {
            DomainError::Validation(_) | DomainError::Conflict(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Internal(detail) => {
                tracing::error!(error = %detail, "{internal_message}");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, internal_message);
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from_domain(err, GENERIC_INTERNAL)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: &self.message,
            }),
        )
            .into_response()
    }
}

/// Attaches a route's generic 500 message to a service result.
pub trait Context<T> {
    fn context(self, internal_message: &str) -> Result<T, ApiError>;
}

impl<T> Context<T> for domains::Result<T> {
    fn context(self, internal_message: &str) -> Result<T, ApiError> {
        self.map_err(|err| ApiError::from_domain(err, internal_message))
    }
}
