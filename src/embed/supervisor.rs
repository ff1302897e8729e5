//! Embed lifecycle supervision.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use crate::config::schema::{EmbedConfig, ProbeConfig};
use crate::probe::{AvailabilityProbe, ProbeErrorKind};

/// Lifecycle state of an embedded third-party surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedStatus {
    /// Reachability check outstanding.
    Probing,
    /// Origin reachable; the frame may be mounted.
    Ready,
    /// Origin not reachable; offer retry and the external link.
    Unreachable(ProbeErrorKind),
    /// Origin reachable but the mounted frame failed to load.
    FrameRefused,
}

/// Decides whether an embed should be mounted, and tracks what the host
/// reports about it afterwards.
pub struct EmbedSupervisor {
    name: String,
    base_url: String,
    probe: AvailabilityProbe,
    timeout: Duration,
    max_attempts: u32,
    backoff_base: Duration,
    status_tx: watch::Sender<EmbedStatus>,
    frame_loaded: AtomicBool,
}

impl EmbedSupervisor {
    pub fn new(embed: EmbedConfig, probe_config: &ProbeConfig) -> Self {
        let (status_tx, _) = watch::channel(EmbedStatus::Probing);
        Self {
            name: embed.name,
            base_url: embed.base_url,
            probe: AvailabilityProbe::new(),
            timeout: Duration::from_millis(probe_config.timeout_ms),
            max_attempts: probe_config.max_attempts,
            backoff_base: Duration::from_millis(probe_config.backoff_base_ms),
            status_tx,
            frame_loaded: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Out-of-frame link offered alongside every error panel.
    pub fn external_url(&self) -> &str {
        &self.base_url
    }

    /// Current status.
    pub fn status(&self) -> EmbedStatus {
        *self.status_tx.borrow()
    }

    /// Receiver that observes every status transition.
    pub fn subscribe(&self) -> watch::Receiver<EmbedStatus> {
        self.status_tx.subscribe()
    }

    /// Run the retry-bounded probe and publish the verdict.
    pub async fn resolve(&self) -> EmbedStatus {
        self.status_tx.send_replace(EmbedStatus::Probing);
        self.frame_loaded.store(false, Ordering::SeqCst);

        let result = self
            .probe
            .check_with_retry(&self.base_url, self.timeout, self.max_attempts, self.backoff_base)
            .await;

        let status = if result.reachable {
            EmbedStatus::Ready
        } else {
            EmbedStatus::Unreachable(result.error_kind.unwrap_or(ProbeErrorKind::NetworkError))
        };

        tracing::info!(embed = %self.name, ?status, "embed probe resolved");
        self.status_tx.send_replace(status);
        status
    }

    /// Host confirms the mounted frame rendered.
    ///
    /// Only meaningful from Ready; ignored otherwise.
    pub fn mark_frame_loaded(&self) {
        if self.status() == EmbedStatus::Ready {
            self.frame_loaded.store(true, Ordering::SeqCst);
            tracing::debug!(embed = %self.name, "frame load confirmed by host");
        }
    }

    /// Whether the host has confirmed the mounted frame rendered.
    pub fn frame_loaded(&self) -> bool {
        self.frame_loaded.load(Ordering::SeqCst)
    }

    /// Host reports the mounted frame failed to load (framing refused).
    ///
    /// Only meaningful from Ready; ignored otherwise.
    pub fn mark_frame_refused(&self) {
        self.status_tx.send_if_modified(|status| {
            if *status == EmbedStatus::Ready {
                tracing::warn!(embed = %self.name, "mounted frame refused to load");
                self.frame_loaded.store(false, Ordering::SeqCst);
                *status = EmbedStatus::FrameRefused;
                true
            } else {
                false
            }
        });
    }

    /// Probe again after a failure. Replaces the whole-page reload the old
    /// UI used for retry.
    pub async fn retry(&self) -> EmbedStatus {
        self.resolve().await
    }
}
