//! HTTP error payloads and mapping from core errors.
//!
//! Keeps the core free of transport concerns by translating
//! [`ValidationError`] and [`DatabaseError`] into status codes and the
//! `{"error": ...}` envelope here.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::NaiveDate;
use risetrack_core::{DatabaseError, ValidationError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Transport-level error with an HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure; details are logged, not returned.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub(crate) fn day_not_found(day: NaiveDate) -> Self {
        ApiError::NotFound(format!("Day '{day}' not found."))
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::DuplicateDay { day } => {
                ApiError::Conflict(format!("Day '{day}' already exists. Use PUT to update."))
            }
            other => {
                error!(error = %other, "database failure");
                ApiError::Internal
            }
        }
    }
}

/// Standard error envelope returned by every endpoint.
#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        HttpResponse::build(self.status_code()).json(ErrorBody { error: &message })
    }
}
