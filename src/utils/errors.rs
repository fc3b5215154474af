//! Error handling for Nuqta
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy. Repository-layer store
//! errors are wrapped here and converted to a uniform response shape before
//! they reach a caller; raw store errors never cross the service boundary.

use serde::Serialize;
use thiserror::Error;

/// Main error type for the Nuqta application
#[derive(Error, Debug)]
pub enum NuqtaError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Email delivery error: {0}")]
    Email(#[from] EmailError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{0}")]
    BusinessLogic(String),

    #[error("Profile not found: {profile_id}")]
    ProfileNotFound { profile_id: i64 },

    #[error("Vendor not found: {vendor_id}")]
    VendorNotFound { vendor_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Booking not found: {booking_id}")]
    BookingNotFound { booking_id: i64 },

    #[error("Access token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Transactional email API specific errors
#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email API request failed: {0}")]
    RequestFailed(String),

    #[error("Email API rejected the message: status {status}")]
    Rejected { status: u16 },

    #[error("Email API timeout")]
    Timeout,
}

/// Result type alias for Nuqta operations
pub type Result<T> = std::result::Result<T, NuqtaError>;

impl NuqtaError {
    /// Build a validation error without a field reference
    pub fn validation(message: impl Into<String>) -> Self {
        NuqtaError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Build a validation error attached to a specific input field
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        NuqtaError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            NuqtaError::Validation { .. } => "VALIDATION_ERROR",
            NuqtaError::Unauthorized(_) | NuqtaError::Token(_) => "UNAUTHORIZED",
            NuqtaError::Forbidden(_) => "FORBIDDEN",
            NuqtaError::Conflict(_) => "CONFLICT",
            NuqtaError::BusinessLogic(_) => "BUSINESS_LOGIC_ERROR",
            NuqtaError::ProfileNotFound { .. }
            | NuqtaError::VendorNotFound { .. }
            | NuqtaError::EventNotFound { .. }
            | NuqtaError::BookingNotFound { .. } => "NOT_FOUND",
            NuqtaError::Database(_) | NuqtaError::Migration(_) => "DATABASE_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    /// HTTP status the error maps to at the calling-action boundary
    pub fn status_code(&self) -> u16 {
        match self {
            NuqtaError::Validation { .. } | NuqtaError::BusinessLogic(_) => 400,
            NuqtaError::Unauthorized(_) | NuqtaError::Token(_) => 401,
            NuqtaError::Forbidden(_) => 403,
            NuqtaError::ProfileNotFound { .. }
            | NuqtaError::VendorNotFound { .. }
            | NuqtaError::EventNotFound { .. }
            | NuqtaError::BookingNotFound { .. } => 404,
            NuqtaError::Conflict(_) => 409,
            _ => 500,
        }
    }

    /// Check if the error is recoverable by retrying later
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            NuqtaError::Email(_) | NuqtaError::Http(_) | NuqtaError::Io(_)
        )
    }
}

/// Uniform error shape handed to calling actions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&NuqtaError> for ErrorResponse {
    fn from(err: &NuqtaError) -> Self {
        let field = match err {
            NuqtaError::Validation { field, .. } => field.clone(),
            _ => None,
        };

        // Unexpected errors get a generic message; validation and business
        // errors keep their specific text.
        let error = match err.status_code() {
            500 => "Something went wrong. Please try again later.".to_string(),
            _ => err.to_string(),
        };

        Self {
            error,
            code: err.code(),
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(NuqtaError::validation("bad input").code(), "VALIDATION_ERROR");
        assert_eq!(
            NuqtaError::BookingNotFound { booking_id: 7 }.code(),
            "NOT_FOUND"
        );
        assert_eq!(
            NuqtaError::Forbidden("not your booking".into()).status_code(),
            403
        );
        assert_eq!(NuqtaError::Conflict("already claimed".into()).status_code(), 409);
    }

    #[test]
    fn test_database_errors_are_masked() {
        let err = NuqtaError::Database(sqlx::Error::PoolClosed);
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "DATABASE_ERROR");
        assert!(!response.error.to_lowercase().contains("pool"));
    }

    #[test]
    fn test_validation_field_is_carried() {
        let err = NuqtaError::validation_field("phone", "Phone number is too short");
        let response = ErrorResponse::from(&err);
        assert_eq!(response.field.as_deref(), Some("phone"));
        assert!(response.error.contains("too short"));
    }
}
