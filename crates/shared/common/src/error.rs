//! Unified error handling.
//!
//! One error type for the whole request path. It is converted to the
//! response envelope at the HTTP boundary, the only place that consults the
//! `ErrorCode` table.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

use crate::codes::ErrorCode;
use crate::response::{ApiResponse, ResponseStatus};

/// Generic message shown to end users on every error
pub const DISPLAY_ERROR_MESSAGE: &str = "Oops!! Something went wrong. Please try again.";

/// Sibling services reached over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DownstreamService {
    Auth,
    Tuition,
    Payment,
}

impl std::fmt::Display for DownstreamService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DownstreamService::Auth => f.write_str("auth"),
            DownstreamService::Tuition => f.write_str("tuition"),
            DownstreamService::Payment => f.write_str("payment"),
        }
    }
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Input
    #[error("{0}")]
    Validation(String),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    AlreadyExists(String),

    // Enrollment preconditions
    #[error("Student already enrolled in a tuition")]
    AlreadyEnrolled,

    #[error("Student not enrolled in tuition")]
    NotEnrolled,

    // External service errors
    /// Non-2xx answer (or transport failure, `status == None`) from a peer
    #[error("{service} service call failed (status: {status:?})")]
    Downstream {
        service: DownstreamService,
        status: Option<u16>,
        body: Option<String>,
    },

    #[cfg(feature = "database")]
    #[error("Storage failure during {operation} for {id}")]
    Storage {
        operation: &'static str,
        id: String,
        #[source]
        source: sea_orm::DbErr,
    },

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Look up the application error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::MissingRequiredFields,
            AppError::NotFound => ErrorCode::StudentNotFound,
            AppError::AlreadyExists(_) => ErrorCode::StudentAlreadyExists,
            AppError::AlreadyEnrolled => ErrorCode::StudentAlreadyEnrolledInATuition,
            AppError::NotEnrolled => ErrorCode::StudentNotEnrolledInTuition,
            AppError::Downstream { service, .. } => match service {
                DownstreamService::Auth => ErrorCode::AuthInternalServerError,
                DownstreamService::Tuition => ErrorCode::TuitionInternalServerError,
                DownstreamService::Payment => ErrorCode::PaymentInternalServerError,
            },
            #[cfg(feature = "database")]
            AppError::Storage { .. } => ErrorCode::InternalServerError,
            AppError::Internal(_) => ErrorCode::InternalServerError,
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::NotFound
            | AppError::AlreadyExists(_)
            | AppError::AlreadyEnrolled
            | AppError::NotEnrolled => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        let base = self.code().message();
        match self {
            AppError::Validation(detail) => format!("{}: {}", base, detail),
            #[cfg(feature = "database")]
            AppError::Storage { .. } => {
                tracing::error!(error = %self, source = ?std::error::Error::source(self), "Storage failure");
                base.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                base.to_string()
            }
            _ => base.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (remote_status, remote_body) = match &self {
            AppError::Downstream { status, body, .. } => (*status, body.clone()),
            _ => (None, None),
        };

        let body: ApiResponse<()> = ApiResponse {
            status: ResponseStatus::Error,
            message: self.user_message(),
            data: None,
            display_message: Some(DISPLAY_ERROR_MESSAGE.to_string()),
            error_code: Some(self.code().code()),
            remote_status,
            remote_body,
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Password(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn already_exists(entity: impl Into<String>) -> Self {
        AppError::AlreadyExists(entity.into())
    }

    pub fn downstream(service: DownstreamService, status: Option<u16>, body: impl Into<String>) -> Self {
        AppError::Downstream {
            service,
            status,
            body: Some(body.into()),
        }
    }

    #[cfg(feature = "database")]
    pub fn storage(operation: &'static str, id: impl Into<String>, source: sea_orm::DbErr) -> Self {
        AppError::Storage {
            operation,
            id: id.into(),
            source,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_is_bad_request() {
        let (status, json) = body_json(AppError::NotFound).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "ERROR");
        assert_eq!(json["errorCode"], 4005);
        assert_eq!(json["message"], "Student not found");
        assert_eq!(json["displayMessage"], DISPLAY_ERROR_MESSAGE);
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_downstream_passes_remote_status_and_body() {
        let err = AppError::downstream(DownstreamService::Tuition, Some(503), "tuition down");
        let (status, json) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["errorCode"], 5002);
        assert_eq!(json["remoteStatus"], 503);
        assert_eq!(json["remoteBody"], "tuition down");
    }

    #[tokio::test]
    async fn test_internal_hides_detail() {
        let (status, json) = body_json(AppError::internal("connection pool exhausted")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["errorCode"], 5000);
        assert!(!json["message"].as_str().unwrap().contains("pool"));
    }

    #[test]
    fn test_validation_message_includes_detail() {
        let err = AppError::validation("Username is required");
        assert_eq!(err.user_message(), "Missing required fields: Username is required");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_enrollment_codes() {
        assert_eq!(AppError::AlreadyEnrolled.code().code(), 4007);
        assert_eq!(AppError::NotEnrolled.code().code(), 4006);
        assert_eq!(AppError::already_exists("Student").code().code(), 4003);
    }

    #[test]
    fn test_domain_error_conversion() {
        let err: AppError = DomainError::validation("Password is required").into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
