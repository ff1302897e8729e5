//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     TOML file (or built-in defaults)
//!     → loader.rs (read + parse)
//!     → validation.rs (semantic checks, all errors reported)
//!     → DashboardConfig accepted
//!
//! Hot reload:
//!     File change event (watcher.rs)
//!     → loader.rs re-runs
//!     → valid config pushed to the daemon over an mpsc channel
//!     → invalid config logged, previous config kept
//! ```

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    DashboardConfig, EmbedConfig, EndpointsConfig, ObservabilityConfig, PollingConfig,
    ProbeConfig, SearchConfig,
};
