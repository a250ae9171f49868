//! Error types for the Room 19 server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{DomainViolation, Rejection};

/// Application error codes exposed in JSON error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchResource = 4,
    NoSuchLoan = 5,
    FullyBooked = 6,
    ResourceClosed = 7,
    Duplicate = 8,
    ExtensionLimitReached = 9,
    FineOutstanding = 10,
    AlreadyReturned = 11,
    StaleCommit = 12,
    BadValue = 13,
    NoSuchData = 14,
    InvalidTransition = 15,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// Expected business outcome the caller must render to the user
    #[error("{0}")]
    Rejected(#[from] Rejection),

    /// Programmer/data error, or a race the optimistic guard caught
    #[error("{0}")]
    Violation(#[from] DomainViolation),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchResource, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::Rejected(rejection) => {
                let code = match rejection {
                    Rejection::ExtensionLimitReached => ErrorCode::ExtensionLimitReached,
                    Rejection::OutstandingFine => ErrorCode::FineOutstanding,
                    Rejection::AlreadyReturned => ErrorCode::AlreadyReturned,
                    Rejection::NoFineOwed => ErrorCode::Failure,
                    Rejection::InvalidTransition { .. } => ErrorCode::InvalidTransition,
                };
                (StatusCode::UNPROCESSABLE_ENTITY, code, rejection.to_string())
            }
            AppError::Violation(violation) => {
                tracing::error!("Invariant violation: {}", violation);
                let (status, code) = match violation {
                    DomainViolation::StaleCommit { .. } => {
                        (StatusCode::CONFLICT, ErrorCode::StaleCommit)
                    }
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
                };
                (status, code, violation.to_string())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
