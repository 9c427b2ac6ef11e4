//! Request body extractor for student payloads.
//!
//! Malformed JSON and failed field checks both surface as
//! `AppError::Validation`, which renders as the 4001 envelope.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;
use validator::{Validate, ValidationErrors};

use common::AppError;

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                warn!(error = %rejection.body_text(), "Rejected unreadable request body");
                AppError::validation(rejection.body_text())
            })?;

        payload.validate().map_err(failed_fields)?;

        Ok(ValidatedJson(payload))
    }
}

/// Name every failing field in the log and join their messages, ordered by
/// field name so the response is stable.
fn failed_fields(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let message = field_errors
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{} is invalid", field));
            (field.to_string(), message)
        })
        .collect();
    fields.sort();

    let names: Vec<&str> = fields.iter().map(|(field, _)| field.as_str()).collect();
    warn!(fields = ?names, "Request failed field validation");

    if fields.is_empty() {
        return AppError::validation("Validation failed");
    }
    let messages: Vec<&str> = fields.iter().map(|(_, message)| message.as_str()).collect();
    AppError::validation(messages.join(", "))
}
