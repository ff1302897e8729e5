//! Startup and shutdown coordination.

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, StopSignal};
