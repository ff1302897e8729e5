//! Bounded reachability checks against embed origins.

use std::time::{Duration, SystemTime};

use rand::Rng;
use tokio::time;

use crate::observability::metrics;

/// Ceiling for the backoff between retry attempts.
const BACKOFF_CAP: Duration = Duration::from_secs(5);

/// Why a probe concluded the origin was not reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeErrorKind {
    /// No response within the configured wall-clock timeout.
    Timeout,
    /// Connection-level failure (refused, DNS, reset).
    NetworkError,
    /// Origin responded with a non-success status.
    HttpError(u16),
}

/// Outcome of a single reachability check. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    /// True only on a successful response.
    pub reachable: bool,
    /// When the verdict was produced.
    pub checked_at: SystemTime,
    /// Set whenever `reachable` is false.
    pub error_kind: Option<ProbeErrorKind>,
}

/// Reachability checker for external origins.
///
/// Uses HEAD requests to avoid downloading bodies; the origin only has to
/// answer, not serve content.
#[derive(Clone)]
pub struct AvailabilityProbe {
    client: reqwest::Client,
}

impl AvailabilityProbe {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Probe `url` once with a bounded wait.
    ///
    /// Every failure mode (timeout, connection error, non-success status)
    /// is folded into the returned [`ProbeResult`].
    pub async fn check(&self, url: &str, timeout: Duration) -> ProbeResult {
        let request = self.client.head(url).send();

        let error_kind = match time::timeout(timeout, request).await {
            Ok(Ok(response)) => {
                let status = response.status();
                if status.is_success() {
                    None
                } else {
                    tracing::warn!(url, status = %status, "probe failed: non-success status");
                    Some(ProbeErrorKind::HttpError(status.as_u16()))
                }
            }
            Ok(Err(e)) => {
                if e.is_timeout() {
                    tracing::warn!(url, error = %e, "probe failed: request timeout");
                    Some(ProbeErrorKind::Timeout)
                } else {
                    tracing::warn!(url, error = %e, "probe failed: connection error");
                    Some(ProbeErrorKind::NetworkError)
                }
            }
            Err(_) => {
                tracing::warn!(url, timeout_ms = timeout.as_millis() as u64, "probe failed: timeout");
                Some(ProbeErrorKind::Timeout)
            }
        };

        let result = ProbeResult {
            reachable: error_kind.is_none(),
            checked_at: SystemTime::now(),
            error_kind,
        };
        metrics::record_probe(url, result.reachable);
        result
    }

    /// Repeat [`check`](Self::check) up to `max_attempts` times with
    /// exponential backoff + jitter between attempts.
    ///
    /// Returns the first reachable result, or the last failure once the
    /// attempts are exhausted.
    pub async fn check_with_retry(
        &self,
        url: &str,
        timeout: Duration,
        max_attempts: u32,
        backoff_base: Duration,
    ) -> ProbeResult {
        let max_attempts = max_attempts.max(1);
        let mut last = self.check(url, timeout).await;

        for attempt in 1..max_attempts {
            if last.reachable {
                break;
            }
            time::sleep(backoff_delay(attempt, backoff_base, BACKOFF_CAP)).await;
            last = self.check(url, timeout).await;
        }
        last
    }
}

impl Default for AvailabilityProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Exponential backoff delay with jitter (0 to 10% of the delay).
fn backoff_delay(attempt: u32, base: Duration, max: Duration) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let exponential = 2u64.saturating_pow(attempt - 1);
    let delay_ms = (base.as_millis() as u64)
        .saturating_mul(exponential)
        .min(max.as_millis() as u64);

    let jitter_range = delay_ms / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(delay_ms + jitter)
}
