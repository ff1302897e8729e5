//! robodash daemon: headless polling and availability core for the
//! robotics-training dashboard.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                 ROBODASH                      │
//!                  │                                               │
//!   stats endpoint │  ┌────────┐   ┌────────────┐                 │
//!   ◀──────────────┼──│ Poller │──▶│ PollState  │──▶ subscribers  │
//!                  │  └────────┘   └────────────┘                 │
//!                  │                                               │
//!   embed origins  │  ┌────────────────┐   ┌─────────────────┐    │
//!   ◀──────────────┼──│ Availability   │──▶│ EmbedSupervisor │    │
//!                  │  │ Probe (HEAD)   │   │ (watch channel) │    │
//!                  │  └────────────────┘   └─────────────────┘    │
//!                  │                                               │
//!                  │  ┌─────────────────────────────────────────┐ │
//!                  │  │          Cross-Cutting Concerns          │ │
//!                  │  │  config + hot reload │ tracing │ metrics │ │
//!                  │  │          lifecycle (signals/shutdown)    │ │
//!                  │  └─────────────────────────────────────────┘ │
//!                  └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;

use robodash::api::{ApiClient, DashboardStats};
use robodash::config::watcher::ConfigWatcher;
use robodash::config::{load_config, DashboardConfig};
use robodash::embed::{EmbedStatus, EmbedSupervisor};
use robodash::lifecycle::{signals, Shutdown};
use robodash::poll::{FetchError, Poller, PollerOptions, Subscription};

#[derive(Parser)]
#[command(name = "robodash")]
#[command(about = "Headless polling and availability core for the training dashboard")]
struct Args {
    /// Path to the TOML configuration file (built-in defaults when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DashboardConfig::default().with_default_embeds(),
    };

    robodash::observability::logging::init_logging(&config.observability.log_level);

    tracing::info!("robodash v0.1.0 starting");
    tracing::info!(
        stats_url = %config.endpoints.stats_url,
        interval_ms = config.polling.interval_ms,
        embeds = config.embeds.len(),
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            robodash::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            );
        }
    }

    let shutdown = Shutdown::new();

    // Probe each configured embed once and report its verdict.
    for embed in config.embeds.clone() {
        let probe_config = config.probe.clone();
        let mut embed_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let supervisor = EmbedSupervisor::new(embed, &probe_config);
            tokio::select! {
                status = supervisor.resolve() => match status {
                    EmbedStatus::Ready => {
                        tracing::info!(embed = supervisor.name(), "embed ready to mount");
                    }
                    status => {
                        tracing::warn!(
                            embed = supervisor.name(),
                            ?status,
                            external_url = supervisor.external_url(),
                            "embed unavailable, offer the external link"
                        );
                    }
                },
                _ = embed_shutdown.stopped() => {}
            }
        });
    }

    let (mut poller, mut subscription) = build_stats_poller(&config)?;

    // Hot reload: watch the config file when one was given.
    let (_fallback_tx, fallback_rx) = mpsc::unbounded_channel();
    let mut config_updates = fallback_rx;
    let mut _watcher_handle = None;
    if let Some(path) = &args.config {
        let (watcher, rx) = ConfigWatcher::new(path);
        match watcher.run() {
            Ok(handle) => {
                _watcher_handle = Some(handle);
                config_updates = rx;
            }
            Err(e) => {
                tracing::error!(error = %e, "config watcher failed to start, hot reload disabled");
            }
        }
    }

    loop {
        tokio::select! {
            _ = signals::wait_for_termination() => {
                tracing::info!("termination signal received");
                break;
            }
            update = config_updates.recv() => {
                if let Some(new_config) = update {
                    match build_stats_poller(&new_config) {
                        Ok((new_poller, new_subscription)) => {
                            poller.stop();
                            poller = new_poller;
                            subscription = new_subscription;
                            tracing::info!("configuration reloaded, stats poller restarted");
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "reloaded config rejected, keeping previous poller");
                        }
                    }
                }
            }
        }
    }

    shutdown.trigger();
    poller.stop();
    drop(subscription);

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Build and start the stats poller, logging every refresh.
fn build_stats_poller(
    config: &DashboardConfig,
) -> Result<(Poller<DashboardStats>, Subscription<DashboardStats>), robodash::poll::PollError> {
    let client = ApiClient::new(config.endpoints.clone());

    let poller = Poller::new(
        move || {
            let client = client.clone();
            async move { client.fetch_stats().await.map_err(FetchError::from) }
        },
        Duration::from_millis(config.polling.interval_ms),
        PollerOptions {
            label: "stats".to_string(),
            on_error: config.polling.on_error,
        },
    )?;

    let subscription = poller.subscribe(|state| {
        if state.is_loading {
            return;
        }
        match &state.error {
            Some(error) => {
                tracing::warn!(error = %error, "stats refresh failed, keeping last known values");
            }
            None => {
                tracing::info!(
                    total_datasets = state.data.total_datasets,
                    storage_used = state.data.storage_used,
                    api_calls_today = state.data.api_calls_today,
                    active_users = state.data.active_users,
                    "stats refreshed"
                );
            }
        }
    });

    poller.start();
    Ok((poller, subscription))
}
