//! Dashboard statistics model.

use serde::{Deserialize, Serialize};

/// Aggregate statistics shown on the dashboard landing view.
///
/// Every field is optional in the backend response; missing fields fall back
/// to zero or empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_datasets: u64,

    /// Gigabytes.
    pub storage_used: f64,

    pub api_calls_today: u64,

    pub active_users: u64,

    /// Filenames of the most recent uploads.
    pub recent_uploads: Vec<String>,

    pub popular_searches: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_response_deserializes() {
        let json = r#"{
            "total_datasets": 10,
            "storage_used": 337.76,
            "api_calls_today": 120,
            "active_users": 1,
            "recent_uploads": ["weld_001.png"],
            "popular_searches": ["seam"]
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_datasets, 10);
        assert_eq!(stats.storage_used, 337.76);
        assert_eq!(stats.api_calls_today, 120);
        assert_eq!(stats.active_users, 1);
        assert_eq!(stats.recent_uploads, vec!["weld_001.png"]);
        assert_eq!(stats.popular_searches, vec!["seam"]);
    }

    #[test]
    fn missing_fields_default() {
        let stats: DashboardStats = serde_json::from_str(r#"{"total_datasets": 3}"#).unwrap();
        assert_eq!(stats.total_datasets, 3);
        assert_eq!(stats.storage_used, 0.0);
        assert_eq!(stats.active_users, 0);
        assert!(stats.recent_uploads.is_empty());
        assert!(stats.popular_searches.is_empty());
    }
}
