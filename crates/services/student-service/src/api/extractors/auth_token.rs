//! Extracts the caller's token from the `Authorization` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use common::AppError;
use domain::AUTH_HEADER;

use crate::clients::AuthToken;

#[async_trait]
impl<S> FromRequestParts<S> for AuthToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AUTH_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                warn!(header = AUTH_HEADER, "Authorization header missing or empty");
                AppError::validation("Authorization header is required")
            })?;

        Ok(AuthToken::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<AuthToken, AppError> {
        let (mut parts, _) = request.into_parts();
        AuthToken::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_token_forwarded_verbatim() {
        let request = Request::builder()
            .header("Authorization", "Bearer abc.def")
            .body(())
            .unwrap();

        assert_eq!(extract(request).await.unwrap().as_str(), "Bearer abc.def");
    }

    #[tokio::test]
    async fn test_missing_or_blank_header_rejected() {
        let missing = Request::builder().body(()).unwrap();
        let blank = Request::builder()
            .header("Authorization", "  ")
            .body(())
            .unwrap();

        assert!(matches!(extract(missing).await, Err(AppError::Validation(_))));
        assert!(matches!(extract(blank).await, Err(AppError::Validation(_))));
    }
}
