//! Typed access to the dashboard backend.
//!
//! # Data Flow
//! ```text
//! Stats (stats.rs):
//!     GET stats_url → DashboardStats (missing fields default)
//!
//! Images (client.rs):
//!     GET images_url/<folder> → Vec<filename>
//!
//! Search (search.rs):
//!     POST search_url { query }
//!     → "ok": result list
//!     → "launching": wait fixed delay, retry (bounded)
//! ```

pub mod client;
pub mod search;
pub mod stats;

pub use client::{ApiClient, ApiError};
pub use search::{SearchResponse, SearchStatus};
pub use stats::DashboardStats;
