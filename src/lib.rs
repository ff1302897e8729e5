//! Robodash: polling and availability core for a robotics-training dashboard.

pub mod api;
pub mod config;
pub mod embed;
pub mod lifecycle;
pub mod observability;
pub mod poll;
pub mod probe;

pub use config::schema::DashboardConfig;
pub use lifecycle::Shutdown;
pub use poll::Poller;
pub use probe::AvailabilityProbe;
