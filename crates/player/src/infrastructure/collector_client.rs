//! HTTP client for the remote collector

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use ugclab_shared::{TimeRecordSubmission, UgcSubmission};

use crate::ports::outbound::{CollectorError, CollectorPort};

/// Posts submissions and dwell records to the collector's `/data/...` routes.
#[derive(Clone)]
pub struct HttpCollectorClient {
    client: Client,
    base_url: String,
}

impl HttpCollectorClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Liveness probe; any failure counts as down.
    pub async fn check_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "Collector health check failed");
                false
            }
        }
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<(), CollectorError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "Posting to collector");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| CollectorError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollectorError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CollectorPort for HttpCollectorClient {
    async fn post_ugc(&self, submission: &UgcSubmission) -> Result<(), CollectorError> {
        self.post("/data/ugc", submission).await
    }

    async fn post_time_record(&self, record: &TimeRecordSubmission) -> Result<(), CollectorError> {
        self.post("/data/time", record).await
    }
}
