//! Search endpoint with the viewer launch-retry protocol.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::client::{decode_error, ApiClient, ApiError};
use crate::observability::metrics;

/// Backend search status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    /// Results available.
    Ok,
    /// The downstream viewer process is still starting; retry later.
    Launching,
}

/// Raw response from one search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub status: SearchStatus,

    /// Result entries; present on `"ok"`, absent while launching.
    #[serde(default)]
    pub query: Vec<String>,
}

impl ApiClient {
    /// Issue a single search call.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, ApiError> {
        let response = self
            .http
            .post(&self.endpoints.search_url)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }
        response.json().await.map_err(decode_error)
    }

    /// Search, waiting out the downstream viewer's launch window.
    ///
    /// A `"launching"` answer means the viewer process is still starting;
    /// wait `retry_delay` and try again, up to `max_launch_retries` times.
    /// The old UI retried forever via a bare delayed re-invocation; the
    /// bound keeps a viewer that never comes up from looping indefinitely.
    pub async fn search_with_launch_retry(
        &self,
        query: &str,
        retry_delay: Duration,
        max_launch_retries: u32,
    ) -> Result<Vec<String>, ApiError> {
        let mut response = self.search(query).await?;
        let mut retries = 0;

        while response.status == SearchStatus::Launching {
            if retries >= max_launch_retries {
                return Err(ApiError::ViewerLaunching(retries));
            }
            retries += 1;
            metrics::record_search_launch_retry();
            tracing::info!(
                query,
                retry = retries,
                delay_ms = retry_delay.as_millis() as u64,
                "search viewer launching, retrying"
            );
            tokio::time::sleep(retry_delay).await;
            response = self.search(query).await?;
        }

        Ok(response.query)
    }
}
