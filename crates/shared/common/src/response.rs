//! Uniform response envelope.
//!
//! Every endpoint answers with `{status, message, data}`; error envelopes
//! (built by `AppError::into_response`) add the application error code and,
//! for downstream failures, the remote status and body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::codes::SuccessCode;

/// Outcome marker of an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Response envelope shared by success and error responses.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_body: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(code: SuccessCode, data: T) -> Self {
        Self::build(code, Some(data))
    }

    fn build(code: SuccessCode, data: Option<T>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: code.message().to_string(),
            data,
            display_message: None,
            error_code: None,
            remote_status: None,
            remote_body: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope with `data: null`
    pub fn empty(code: SuccessCode) -> Self {
        Self::build(code, None)
    }
}

/// Success envelopes answer 200; error envelopes are rendered by `AppError`.
impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Created response helper for POST endpoints that create a resource
pub struct Created<T>(pub ApiResponse<T>);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
