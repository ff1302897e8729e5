//! Configuration loading and hot reload against a real file on disk.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;

use robodash::config::watcher::ConfigWatcher;
use robodash::config::{load_config, ConfigError, DashboardConfig};

fn temp_config_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("robodash-{}-{}.toml", name, std::process::id()))
}

#[test]
fn file_values_override_defaults_and_the_rest_fall_back() {
    let path = temp_config_path("load");
    fs::write(&path, "[polling]\ninterval_ms = 1000\n").unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.polling.interval_ms, 1000);
    assert_eq!(config.probe.timeout_ms, 5_000);
    assert_eq!(config.search.launch_retry_delay_ms, 3_000);

    let _ = fs::remove_file(&path);
}

#[test]
fn rejected_config_reports_every_violation() {
    let path = temp_config_path("invalid");
    fs::write(
        &path,
        "[polling]\ninterval_ms = 0\n\n[probe]\ntimeout_ms = 0\n",
    )
    .unwrap();

    match load_config(&path) {
        Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation failure, got {:?}", other),
    }

    let _ = fs::remove_file(&path);
}

/// Receive reloads until one carries the expected poll interval. In-place
/// rewrites can emit intermediate events (truncation reads as an all-default
/// file), so earlier deliveries are skipped rather than asserted away.
async fn wait_for_reload(
    updates: &mut mpsc::UnboundedReceiver<DashboardConfig>,
    interval_ms: u64,
) -> DashboardConfig {
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            let update = updates.recv().await.expect("watcher channel closed");
            if update.polling.interval_ms == interval_ms {
                return update;
            }
        }
    })
    .await
    .expect("timed out waiting for config reload")
}

#[tokio::test]
async fn watcher_delivers_valid_reloads_and_drops_invalid_ones() {
    let path = temp_config_path("watch");
    fs::write(&path, "[polling]\ninterval_ms = 1000\n").unwrap();

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _watcher = watcher.run().unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    fs::write(&path, "[polling]\ninterval_ms = 2500\n").unwrap();
    wait_for_reload(&mut updates, 2500).await;

    // A rewrite that fails validation must never come through; every
    // re-read in this window sees the zero interval and drops it.
    fs::write(&path, "[polling]\ninterval_ms = 0\n").unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    while let Ok(update) = updates.try_recv() {
        assert_ne!(
            update.polling.interval_ms, 0,
            "invalid reload must be dropped"
        );
    }

    // The watcher survives the bad rewrite and picks up the next good one.
    fs::write(&path, "[polling]\ninterval_ms = 4000\n").unwrap();
    wait_for_reload(&mut updates, 4000).await;

    let _ = fs::remove_file(&path);
}
