//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dashboard
//! core. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::poll::ErrorPolicy;

/// Root configuration for the dashboard core.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Backend endpoint URLs (stats, images, search).
    pub endpoints: EndpointsConfig,

    /// Polling cadence settings.
    pub polling: PollingConfig,

    /// Reachability probe settings.
    pub probe: ProbeConfig,

    /// Search launch-retry settings.
    pub search: SearchConfig,

    /// Third-party surfaces embedded in the dashboard.
    pub embeds: Vec<EmbedConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend endpoint URLs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Statistics endpoint (GET, JSON object).
    pub stats_url: String,

    /// Image listing endpoint. The logical folder name is appended as a
    /// path segment.
    pub images_url: String,

    /// Search endpoint (POST, `{ "query": ... }`).
    pub search_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            stats_url: "http://127.0.0.1:5000/stats".to_string(),
            images_url: "http://127.0.0.1:5000/images".to_string(),
            search_url: "http://127.0.0.1:5000/search".to_string(),
        }
    }
}

/// Polling cadence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Interval between fetch attempts in milliseconds, measured from the
    /// start of the previous attempt.
    pub interval_ms: u64,

    /// What a poller does after a failed attempt.
    pub on_error: ErrorPolicy,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5_000,
            on_error: ErrorPolicy::Continue,
        }
    }
}

/// Reachability probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Wall-clock timeout per probe attempt in milliseconds.
    pub timeout_ms: u64,

    /// Maximum probe attempts before giving up on an origin.
    pub max_attempts: u32,

    /// Base delay for exponential backoff between attempts in milliseconds.
    pub backoff_base_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            max_attempts: 3,
            backoff_base_ms: 500,
        }
    }
}

/// Search launch-retry configuration.
///
/// The search backend answers `"launching"` while the downstream viewer
/// process is still starting; callers wait a fixed delay and retry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Delay before retrying a `"launching"` response, in milliseconds.
    pub launch_retry_delay_ms: u64,

    /// Maximum number of launch retries before the call fails.
    pub max_launch_retries: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            launch_retry_delay_ms: 3_000,
            max_launch_retries: 5,
        }
    }
}

/// A third-party surface embedded in the dashboard.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbedConfig {
    /// Unique embed identifier for logging/metrics.
    pub name: String,

    /// Base URL of the embedded origin, probed before mount.
    pub base_url: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Default embeds matching the observed deployment: dataset viewer,
    /// photo catalog, robotics control panel.
    pub fn with_default_embeds(mut self) -> Self {
        if self.embeds.is_empty() {
            self.embeds = vec![
                EmbedConfig {
                    name: "dataset-viewer".to_string(),
                    base_url: "http://127.0.0.1:5151".to_string(),
                },
                EmbedConfig {
                    name: "photo-catalog".to_string(),
                    base_url: "http://127.0.0.1:2342".to_string(),
                },
                EmbedConfig {
                    name: "robotics-panel".to_string(),
                    base_url: "http://127.0.0.1:5002".to_string(),
                },
            ];
        }
        self
    }
}
