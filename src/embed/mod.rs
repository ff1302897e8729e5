//! Supervision of embedded third-party surfaces.
//!
//! # States
//! - Probing: reachability check outstanding, hosting view shows a loading state
//! - Ready: origin reachable, safe to mount the frame
//! - Unreachable: origin down, show the error panel with retry + external link
//! - FrameRefused: origin up but the mounted frame failed to load
//!
//! # State Transitions
//! ```text
//! Probing → Ready: probe reachable
//! Probing → Unreachable: probe attempts exhausted
//! Ready → FrameRefused: host reports the mounted frame failed
//! any → Probing: retry()
//! ```
//!
//! # Design Decisions
//! - "Origin unreachable" and "origin refused framing" are distinct states
//!   with distinct remedies
//! - Frame health after mount is host-reported best-effort; no reliable
//!   cross-origin signal exists, so the supervisor never infers it
//! - Status is published over a watch channel so views observe transitions
//!   without polling the supervisor

pub mod supervisor;

pub use supervisor::{EmbedStatus, EmbedSupervisor};
