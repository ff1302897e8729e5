//! Reachability probing for external origins.
//!
//! # Data Flow
//! ```text
//! check():
//!     HEAD request with wall-clock timeout
//!     → classify outcome (success / timeout / network / status)
//!     → ProbeResult, never an Err
//!
//! check_with_retry():
//!     check() up to max_attempts times
//!     → exponential backoff + jitter between attempts
//!     → first reachable result, or the last failure
//! ```
//!
//! # Design Decisions
//! - All failure modes are normalized into ProbeResult; callers never
//!   handle a rejection
//! - The timeout is enforced with tokio's timer, so it fires even if the
//!   underlying request never settles
//! - Probe futures are droppable at any await point; dropping one delivers
//!   no result (that is the cancellation mechanism)

pub mod availability;

pub use availability::{AvailabilityProbe, ProbeErrorKind, ProbeResult};
