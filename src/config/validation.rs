//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, attempts >= 1)
//! - Validate endpoint and embed URLs parse
//! - Detect duplicate embed names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DashboardConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::DashboardConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("polling.interval_ms must be positive")]
    ZeroPollInterval,

    #[error("probe.timeout_ms must be positive")]
    ZeroProbeTimeout,

    #[error("probe.max_attempts must be at least 1")]
    ZeroProbeAttempts,

    #[error("{field} is not a valid URL: {reason}")]
    InvalidUrl { field: String, reason: String },

    #[error("embed name must not be empty")]
    EmptyEmbedName,

    #[error("duplicate embed name: {0}")]
    DuplicateEmbedName(String),

    #[error("observability.metrics_address is not a valid socket address: {0}")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &DashboardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.polling.interval_ms == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }
    if config.probe.timeout_ms == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }
    if config.probe.max_attempts == 0 {
        errors.push(ValidationError::ZeroProbeAttempts);
    }

    check_url(&mut errors, "endpoints.stats_url", &config.endpoints.stats_url);
    check_url(&mut errors, "endpoints.images_url", &config.endpoints.images_url);
    check_url(&mut errors, "endpoints.search_url", &config.endpoints.search_url);

    let mut seen = HashSet::new();
    for embed in &config.embeds {
        if embed.name.is_empty() {
            errors.push(ValidationError::EmptyEmbedName);
        } else if !seen.insert(embed.name.as_str()) {
            errors.push(ValidationError::DuplicateEmbedName(embed.name.clone()));
        }
        check_url(
            &mut errors,
            &format!("embeds.{}.base_url", embed.name),
            &embed.base_url,
        );
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if let Err(e) = Url::parse(value) {
        errors.push(ValidationError::InvalidUrl {
            field: field.to_string(),
            reason: e.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::EmbedConfig;

    #[test]
    fn default_config_is_valid() {
        let config = DashboardConfig::default().with_default_embeds();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = DashboardConfig::default();
        config.polling.interval_ms = 0;
        config.probe.max_attempts = 0;
        config.endpoints.stats_url = "not a url".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroPollInterval));
        assert!(errors.contains(&ValidationError::ZeroProbeAttempts));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidUrl { field, .. } if field == "endpoints.stats_url")));
    }

    #[test]
    fn rejects_duplicate_embed_names() {
        let mut config = DashboardConfig::default();
        for _ in 0..2 {
            config.embeds.push(EmbedConfig {
                name: "viewer".to_string(),
                base_url: "http://127.0.0.1:5151".to_string(),
            });
        }
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateEmbedName("viewer".to_string())]
        );
    }
}
