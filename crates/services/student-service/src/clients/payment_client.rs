//! REST client for the payment service.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use common::{AppError, AppResult, DownstreamService, HttpClientConfig};

use super::http::{build_client, check_status, endpoint, parse_base_url, transport_error};

#[cfg(test)]
use mockall::automock;

const SERVICE: DownstreamService = DownstreamService::Payment;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PaymentServiceClient: Send + Sync {
    /// Delete every payment recorded for the student.
    async fn delete_by_student_id(&self, student_id: &str) -> AppResult<()>;
}

pub struct PaymentClient {
    client: Client,
    base_url: Url,
}

impl PaymentClient {
    pub fn new(base_url: &str, config: &HttpClientConfig) -> AppResult<Self> {
        Ok(Self {
            client: build_client(config).map_err(|e| AppError::internal(e.to_string()))?,
            base_url: parse_base_url(SERVICE, base_url)?,
        })
    }
}

#[async_trait]
impl PaymentServiceClient for PaymentClient {
    async fn delete_by_student_id(&self, student_id: &str) -> AppResult<()> {
        let url = endpoint(
            &self.base_url,
            &["api", "v1", "payment", "delete", "student", student_id],
        );
        debug!(%url, "Deleting payments of student");

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        check_status(SERVICE, response).await?;

        Ok(())
    }
}
