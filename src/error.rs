//! Error types for Folium server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes exposed in API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    DbFailure = 2,
    NoSuchBook = 3,
    NoSuchCustomer = 4,
    InvalidIsbn = 5,
    MetadataNotFound = 6,
    NonEnglishIdentifier = 7,
    BookUnavailable = 8,
    AllowanceExceeded = 9,
    DuplicateLoan = 10,
    LoanNotRenewable = 11,
    Duplicate = 12,
    BadValue = 13,
    NoSuchLoan = 14,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Book with ISBN {0} not found")]
    BookNotFound(String),

    #[error("Customer with id {0} not found")]
    CustomerNotFound(i32),

    #[error("Loan with id {0} not found")]
    LoanNotFound(i32),

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

    #[error("Invalid ISBN: {0}")]
    InvalidIsbn(String),

    #[error("No metadata found for ISBN {0}")]
    MetadataNotFound(String),

    #[error("ISBN {0} carries a non English-language identifier")]
    NonEnglishIdentifier(String),

    #[error("Book unavailable: {0}")]
    Unavailable(String),

    #[error("Loan allowance exceeded: {0}")]
    AllowanceExceeded(String),

    #[error("Duplicate loan: {0}")]
    DuplicateLoan(String),

    #[error("Loan not renewable: {0}")]
    NotRenewable(String),
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
            AppError::BookNotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchBook, self.to_string())
            }
            AppError::CustomerNotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchCustomer, self.to_string())
            }
            AppError::LoanNotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchLoan, self.to_string())
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
            AppError::InvalidIsbn(isbn) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidIsbn,
                format!("ISBN Number was Invalid: {}", isbn),
            ),
            AppError::MetadataNotFound(isbn) => (
                StatusCode::NOT_FOUND,
                ErrorCode::MetadataNotFound,
                format!("Book Meta-data not found for ISBN {}", isbn),
            ),
            AppError::NonEnglishIdentifier(isbn) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::NonEnglishIdentifier,
                format!("ISBN {} contains a non English-language identifier", isbn),
            ),
            AppError::Unavailable(msg) => {
                (StatusCode::CONFLICT, ErrorCode::BookUnavailable, msg.clone())
            }
            AppError::AllowanceExceeded(msg) => {
                (StatusCode::CONFLICT, ErrorCode::AllowanceExceeded, msg.clone())
            }
            AppError::DuplicateLoan(msg) => {
                (StatusCode::CONFLICT, ErrorCode::DuplicateLoan, msg.clone())
            }
            AppError::NotRenewable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::LoanNotRenewable,
                msg.clone(),
            ),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn not_found_variants_keep_distinct_codes() {
        // Each missing resource reports its own error code
        assert_eq!(ErrorCode::NoSuchBook as u32, 3);
        assert_eq!(ErrorCode::NoSuchCustomer as u32, 4);
        assert_eq!(ErrorCode::NoSuchLoan as u32, 14);

        assert_eq!(
            status_of(AppError::BookNotFound("9780306406157".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(AppError::CustomerNotFound(7)), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::LoanNotFound(12)), StatusCode::NOT_FOUND);
    }

    #[test]
    fn checkout_denials_map_to_conflict() {
        for err in [
            AppError::Unavailable("Book Unavailable".to_string()),
            AppError::AllowanceExceeded("Reached loan limit".to_string()),
            AppError::DuplicateLoan("already held".to_string()),
        ] {
            assert_eq!(status_of(err), StatusCode::CONFLICT);
        }
    }
}
