//! REST client for the auth service.

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{AppError, AppResult, DownstreamService, HttpClientConfig};
use domain::RoleType;

use super::http::{build_client, check_status, endpoint, parse_base_url, transport_error};

#[cfg(test)]
use mockall::automock;

const SERVICE: DownstreamService = DownstreamService::Auth;

/// Caller's access token, forwarded verbatim to the auth service.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

/// Auth service operations used by student orchestration.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthServiceClient: Send + Sync {
    /// Register a user account and return its auth user id.
    async fn register_user(
        &self,
        username: &str,
        password: &str,
        role: RoleType,
        token: &AuthToken,
    ) -> AppResult<String>;

    /// Delete the user account.
    async fn delete_user(&self, auth_user_id: &str, token: &AuthToken) -> AppResult<()>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    role_type: RoleType,
}

#[derive(Debug, Deserialize)]
struct RegisterEnvelope {
    data: Option<RegisteredUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisteredUser {
    user_id: String,
}

/// reqwest-backed auth service client.
pub struct AuthClient {
    client: Client,
    base_url: Url,
}

impl AuthClient {
    pub fn new(base_url: &str, config: &HttpClientConfig) -> AppResult<Self> {
        Ok(Self {
            client: build_client(config).map_err(|e| AppError::internal(e.to_string()))?,
            base_url: parse_base_url(SERVICE, base_url)?,
        })
    }
}

#[async_trait]
impl AuthServiceClient for AuthClient {
    async fn register_user(
        &self,
        username: &str,
        password: &str,
        role: RoleType,
        token: &AuthToken,
    ) -> AppResult<String> {
        let url = endpoint(&self.base_url, &["api", "v1", "auth", "register"]);
        debug!(%url, username, "Registering user in auth service");

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, token.as_str())
            .json(&RegisterRequest {
                username,
                password,
                role_type: role,
            })
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        let response = check_status(SERVICE, response).await?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| transport_error(SERVICE, e))?;
        let envelope: RegisterEnvelope = serde_json::from_str(&body)
            .map_err(|_| AppError::downstream(SERVICE, Some(status), body.clone()))?;

        envelope
            .data
            .map(|user| user.user_id)
            .ok_or_else(|| AppError::downstream(SERVICE, Some(status), body))
    }

    async fn delete_user(&self, auth_user_id: &str, token: &AuthToken) -> AppResult<()> {
        let url = endpoint(&self.base_url, &["api", "v1", "auth", "delete", auth_user_id]);
        debug!(%url, "Deleting user in auth service");

        let response = self
            .client
            .delete(url)
            .header(AUTHORIZATION, token.as_str())
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        check_status(SERVICE, response).await?;

        Ok(())
    }
}
