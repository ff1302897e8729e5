//! Poll state tracking.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Snapshot of a poller's most recent activity.
///
/// Mutated only by the owning [`Poller`](crate::poll::Poller); consumers
/// receive clones.
#[derive(Debug, Clone, PartialEq)]
pub struct PollState<T> {
    /// Last successful payload. Holds the default until the first success
    /// and never reverts to it afterwards.
    pub data: T,

    /// True while a fetch attempt is outstanding.
    pub is_loading: bool,

    /// Message from the most recent failed attempt, cleared on success.
    pub error: Option<String>,

    /// Wall-clock time of the last successful fetch.
    pub last_updated_at: Option<SystemTime>,
}

impl<T: Default> Default for PollState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            is_loading: false,
            error: None,
            last_updated_at: None,
        }
    }
}

/// What a poller does after a failed fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Keep polling on the same cadence.
    #[default]
    Continue,

    /// Stop the poller after the first failure.
    Stop,
}
