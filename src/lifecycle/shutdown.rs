//! Shutdown coordination for the dashboard core.

use tokio::sync::broadcast;

/// Broadcasts a one-shot stop signal to every long-running task.
///
/// The daemon hands a [`StopSignal`] to each embed probe task it spawns and
/// keeps the coordinator itself; `trigger` releases all of them at once.
/// Dropping the coordinator has the same effect, so probe tasks can never
/// outlive the daemon loop.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Hand out a stop signal for a task about to be spawned.
    pub fn subscribe(&self) -> StopSignal {
        StopSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Release every outstanding [`StopSignal`].
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half held by a spawned task.
pub struct StopSignal {
    rx: broadcast::Receiver<()>,
}

impl StopSignal {
    /// Resolves once shutdown is triggered or the coordinator is dropped.
    pub async fn stopped(&mut self) {
        let _ = self.rx.recv().await;
    }
}
