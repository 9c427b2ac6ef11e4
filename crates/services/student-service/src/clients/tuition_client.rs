//! REST client for the tuition service.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use common::{AppError, AppResult, DownstreamService, HttpClientConfig};

use super::http::{build_client, check_status, endpoint, parse_base_url, transport_error};

#[cfg(test)]
use mockall::automock;

const SERVICE: DownstreamService = DownstreamService::Tuition;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TuitionServiceClient: Send + Sync {
    /// Remove the student from the tuition's roster.
    async fn remove_student(&self, student_id: &str, tuition_id: &str) -> AppResult<()>;
}

pub struct TuitionClient {
    client: Client,
    base_url: Url,
}

impl TuitionClient {
    pub fn new(base_url: &str, config: &HttpClientConfig) -> AppResult<Self> {
        Ok(Self {
            client: build_client(config).map_err(|e| AppError::internal(e.to_string()))?,
            base_url: parse_base_url(SERVICE, base_url)?,
        })
    }
}

#[async_trait]
impl TuitionServiceClient for TuitionClient {
    async fn remove_student(&self, student_id: &str, tuition_id: &str) -> AppResult<()> {
        let url = endpoint(
            &self.base_url,
            &["api", "v1", "tuition", "remove", "student", student_id, "tuition", tuition_id],
        );
        debug!(%url, "Removing student from tuition");

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        check_status(SERVICE, response).await?;

        Ok(())
    }
}
