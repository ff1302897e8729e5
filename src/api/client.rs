//! HTTP client for the dashboard backend.

use thiserror::Error;
use url::Url;

use crate::api::stats::DashboardStats;
use crate::config::schema::EndpointsConfig;

/// Errors from dashboard API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, reset).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("unexpected status {0}")]
    Http(u16),

    /// Backend answered but the body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Configured endpoint could not be used to build a request URL.
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),

    /// The search viewer was still launching after every allowed retry.
    #[error("search viewer still launching after {0} retries")]
    ViewerLaunching(u32),
}

/// Typed client over the configured backend endpoints.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    pub(crate) endpoints: EndpointsConfig,
}

impl ApiClient {
    pub fn new(endpoints: EndpointsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
        }
    }

    /// Fetch the current dashboard statistics.
    pub async fn fetch_stats(&self) -> Result<DashboardStats, ApiError> {
        let response = self.http.get(&self.endpoints.stats_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }
        response.json().await.map_err(decode_error)
    }

    /// List image filenames within a logical folder.
    pub async fn list_images(&self, folder: &str) -> Result<Vec<String>, ApiError> {
        let url = self.images_url_for(folder)?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }
        response.json().await.map_err(decode_error)
    }

    /// Append `folder` to the listing endpoint as a single percent-encoded
    /// path segment, so names with `/` or spaces cannot change the path.
    fn images_url_for(&self, folder: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.endpoints.images_url)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl("images url cannot be a base".to_string()))?
            .pop_if_empty()
            .push(folder);
        Ok(url)
    }
}

pub(crate) fn decode_error(e: reqwest::Error) -> ApiError {
    if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Network(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_images_url(url: &str) -> ApiClient {
        ApiClient::new(EndpointsConfig {
            images_url: url.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn folder_becomes_one_encoded_path_segment() {
        let client = client_with_images_url("http://127.0.0.1:5000/images");
        let url = client.images_url_for("good batch/2").unwrap();
        assert_eq!(url.path(), "/images/good%20batch%2F2");
    }

    #[test]
    fn trailing_slash_on_endpoint_does_not_double_up() {
        let client = client_with_images_url("http://127.0.0.1:5000/images/");
        let url = client.images_url_for("good").unwrap();
        assert_eq!(url.path(), "/images/good");
    }
}
