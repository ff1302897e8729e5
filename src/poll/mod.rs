//! Periodic polling subsystem.
//!
//! # Data Flow
//! ```text
//! Poller (poller.rs):
//!     start()
//!     → immediate fetch, then fixed-cadence ticks
//!     → each attempt updates state.rs
//!     → subscribers notified on every transition
//!
//! State (state.rs):
//!     Idle → Polling (start) → Idle (stop)
//!     Within Polling: Waiting → Fetching → Waiting
//!     Ticks firing mid-fetch are skipped, not queued
//! ```
//!
//! # Design Decisions
//! - Per-instance pollers with explicit start/stop; no module-level timers
//! - Cadence measured from the start of the previous attempt
//! - A failed attempt preserves the last good payload (sticky data)
//! - Generation counter makes stop() race-free against in-flight fetches

pub mod poller;
pub mod state;

pub use poller::{FetchError, PollError, Poller, PollerOptions, Subscription};
pub use state::{ErrorPolicy, PollState};
