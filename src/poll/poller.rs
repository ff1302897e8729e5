//! Generic periodic-refresh primitive.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::{Duration, SystemTime};

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::observability::metrics;
use crate::poll::state::{ErrorPolicy, PollState};

/// Error type a fetch operation may return.
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced at poller construction.
#[derive(Debug, Error)]
pub enum PollError {
    /// Bad construction arguments, fatal.
    #[error("invalid poller configuration: {0}")]
    InvalidConfig(String),
}

/// Construction options for a [`Poller`].
#[derive(Debug, Clone)]
pub struct PollerOptions {
    /// Identifier used in logs and metrics.
    pub label: String,

    /// What to do after a failed fetch attempt.
    pub on_error: ErrorPolicy,
}

impl Default for PollerOptions {
    fn default() -> Self {
        Self {
            label: "poller".to_string(),
            on_error: ErrorPolicy::Continue,
        }
    }
}

type FetchFn<T> =
    Arc<dyn Fn() -> Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send>> + Send + Sync>;
type Listener<T> = Box<dyn Fn(&PollState<T>) + Send + Sync>;

/// Repeatedly invokes a caller-supplied fetch operation on a fixed cadence
/// and exposes the most recent result.
///
/// The cadence is measured from the start of the previous attempt: ticks fire
/// at fixed multiples of the interval after `start()`, and a tick that fires
/// while a fetch is still outstanding is skipped, not queued. At most one
/// fetch is in flight at any time.
///
/// Listeners run synchronously under the poller's state lock and must not
/// call back into the poller.
pub struct Poller<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    label: String,
    fetch: FetchFn<T>,
    interval: Duration,
    on_error: ErrorPolicy,
    state: Mutex<PollState<T>>,
    listeners: Mutex<Vec<(u64, Listener<T>)>>,
    next_listener_id: AtomicU64,
    /// Bumped on stop(); attempts carrying an older generation are discarded
    /// before they can touch state.
    generation: AtomicU64,
    running: AtomicBool,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Poller<T>
where
    T: Clone + Default + Send + 'static,
{
    /// Create a poller around `fetch`. The interval must be positive.
    pub fn new<F, Fut>(
        fetch: F,
        interval: Duration,
        options: PollerOptions,
    ) -> Result<Self, PollError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        if interval.is_zero() {
            return Err(PollError::InvalidConfig(
                "poll interval must be positive".to_string(),
            ));
        }

        let fetch: FetchFn<T> = Arc::new(move || Box::pin(fetch()));
        Ok(Self {
            inner: Arc::new(Inner {
                label: options.label,
                fetch,
                interval,
                on_error: options.on_error,
                state: Mutex::new(PollState::default()),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
                generation: AtomicU64::new(0),
                running: AtomicBool::new(false),
                task: Mutex::new(None),
            }),
        })
    }

    /// Register a listener invoked on every state transition (loading start,
    /// success, failure). Dropping the returned subscription unregisters it.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<T>
    where
        F: Fn(&PollState<T>) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .unwrap()
            .push((id, Box::new(listener)));
        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PollState<T> {
        self.inner.state.lock().unwrap().clone()
    }

    /// Trigger an immediate fetch and schedule repeats. No-op if already
    /// started.
    pub fn start(&self) {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let generation = self.inner.generation.load(Ordering::SeqCst);
        let inner = self.inner.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(inner.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                // The first tick completes immediately.
                ticker.tick().await;

                if !inner.begin_attempt(generation) {
                    break;
                }
                let result = (inner.fetch)().await;
                match result {
                    Ok(data) => {
                        if !inner.commit_success(generation, data) {
                            break;
                        }
                    }
                    Err(e) => {
                        if !inner.commit_failure(generation, e.to_string()) {
                            break;
                        }
                        if inner.on_error == ErrorPolicy::Stop {
                            tracing::warn!(poller = %inner.label, "stopping after failed attempt");
                            inner.running.store(false, Ordering::SeqCst);
                            break;
                        }
                    }
                }
            }
        });

        *self.inner.task.lock().unwrap() = Some(handle);
        tracing::debug!(poller = %self.inner.label, interval_ms = self.inner.interval.as_millis() as u64, "poller started");
    }

    /// Cancel the timer and discard any in-flight result. No-op if already
    /// stopped.
    pub fn stop(&self) {
        if !self.inner.running.swap(false, Ordering::SeqCst) {
            return;
        }

        // Bump under the state lock so a commit racing with stop() either
        // lands entirely before it or is discarded as stale.
        {
            let _state = self.inner.state.lock().unwrap();
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
        }
        if let Some(handle) = self.inner.task.lock().unwrap().take() {
            handle.abort();
        }
        tracing::debug!(poller = %self.inner.label, "poller stopped");
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.inner.task.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl<T: Clone> Inner<T> {
    /// Mark an attempt as started. Returns false if the poller was stopped.
    fn begin_attempt(&self, generation: u64) -> bool {
        let mut state = self.state.lock().unwrap();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        state.is_loading = true;
        metrics::record_poll_attempt(&self.label);
        self.notify(&state);
        true
    }

    fn commit_success(&self, generation: u64, data: T) -> bool {
        let mut state = self.state.lock().unwrap();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(poller = %self.label, "stale fetch result discarded");
            return false;
        }
        state.data = data;
        state.is_loading = false;
        state.error = None;
        state.last_updated_at = Some(SystemTime::now());
        self.notify(&state);
        true
    }

    fn commit_failure(&self, generation: u64, message: String) -> bool {
        let mut state = self.state.lock().unwrap();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(poller = %self.label, "stale fetch failure discarded");
            return false;
        }
        tracing::warn!(poller = %self.label, error = %message, "fetch attempt failed");
        state.is_loading = false;
        state.error = Some(message);
        metrics::record_poll_failure(&self.label);
        self.notify(&state);
        true
    }

    fn notify(&self, state: &PollState<T>) {
        for (_, listener) in self.listeners.lock().unwrap().iter() {
            listener(state);
        }
    }
}

/// Handle for a registered listener; unregisters on drop.
pub struct Subscription<T> {
    inner: Weak<Inner<T>>,
    id: u64,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .listeners
                .lock()
                .unwrap()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
