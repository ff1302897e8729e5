//! Availability probe behavior against live, slow, and dead origins.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use robodash::probe::{AvailabilityProbe, ProbeErrorKind};

mod common;

#[tokio::test]
async fn head_check_reports_reachable() {
    let addr: SocketAddr = "127.0.0.1:29181".parse().unwrap();
    common::start_mock_backend(addr, "{}").await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let probe = AvailabilityProbe::new();
    let result = probe
        .check(&format!("http://{}", addr), Duration::from_millis(1000))
        .await;

    assert!(result.reachable);
    assert!(result.error_kind.is_none());
}

#[tokio::test]
async fn closed_port_reports_network_error_quickly() {
    // Nothing listens here.
    let probe = AvailabilityProbe::new();
    let started = Instant::now();
    let result = probe
        .check("http://127.0.0.1:29199", Duration::from_millis(500))
        .await;

    assert!(!result.reachable);
    assert_eq!(result.error_kind, Some(ProbeErrorKind::NetworkError));
    assert!(
        started.elapsed() < Duration::from_millis(500),
        "connection refused must resolve well inside the timeout"
    );
}

#[tokio::test]
async fn slow_origin_reports_timeout() {
    let addr: SocketAddr = "127.0.0.1:29182".parse().unwrap();
    common::start_programmable_backend(addr, || async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        (200, "{}".to_string())
    })
    .await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let probe = AvailabilityProbe::new();
    let started = Instant::now();
    let result = probe
        .check(&format!("http://{}", addr), Duration::from_millis(100))
        .await;

    assert!(!result.reachable);
    assert_eq!(result.error_kind, Some(ProbeErrorKind::Timeout));
    assert!(started.elapsed() < Duration::from_millis(400));
}

#[tokio::test]
async fn non_success_status_reports_http_error() {
    let addr: SocketAddr = "127.0.0.1:29183".parse().unwrap();
    common::start_programmable_backend(addr, || async { (503, "down".to_string()) }).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let probe = AvailabilityProbe::new();
    let result = probe
        .check(&format!("http://{}", addr), Duration::from_millis(1000))
        .await;

    assert!(!result.reachable);
    assert_eq!(result.error_kind, Some(ProbeErrorKind::HttpError(503)));
}

#[tokio::test]
async fn retry_succeeds_on_third_attempt_and_not_earlier() {
    let addr: SocketAddr = "127.0.0.1:29184".parse().unwrap();
    let attempts = Arc::new(AtomicU32::new(0));
    let a = attempts.clone();
    common::start_programmable_backend(addr, move || {
        let a = a.clone();
        async move {
            if a.fetch_add(1, Ordering::SeqCst) < 2 {
                (503, "starting".to_string())
            } else {
                (200, "{}".to_string())
            }
        }
    })
    .await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let probe = AvailabilityProbe::new();
    let result = probe
        .check_with_retry(
            &format!("http://{}", addr),
            Duration::from_millis(1000),
            3,
            Duration::from_millis(50),
        )
        .await;

    assert!(result.reachable);
    assert_eq!(attempts.load(Ordering::SeqCst), 3, "exactly three attempts expected");
}

#[tokio::test]
async fn retry_exhausts_and_returns_last_failure() {
    let addr: SocketAddr = "127.0.0.1:29185".parse().unwrap();
    let attempts = Arc::new(AtomicU32::new(0));
    let a = attempts.clone();
    common::start_programmable_backend(addr, move || {
        let a = a.clone();
        async move {
            a.fetch_add(1, Ordering::SeqCst);
            (503, "down".to_string())
        }
    })
    .await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let probe = AvailabilityProbe::new();
    let result = probe
        .check_with_retry(
            &format!("http://{}", addr),
            Duration::from_millis(1000),
            2,
            Duration::from_millis(20),
        )
        .await;

    assert!(!result.reachable);
    assert_eq!(result.error_kind, Some(ProbeErrorKind::HttpError(503)));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}
