//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports, counts, timeouts)
//! - Check addresses parse before anything binds to them
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ExplorerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ExplorerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ExplorerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.node.host.trim().is_empty() {
        errors.push(ValidationError::new("node.host", "must not be empty"));
    }
    if config.node.port == 0 {
        errors.push(ValidationError::new("node.port", "must be non-zero"));
    }
    if config.node.cookie_path.trim().is_empty() {
        errors.push(ValidationError::new("node.cookie_path", "must not be empty"));
    }
    if config.node.rpc_timeout_secs == Some(0) {
        errors.push(ValidationError::new("node.rpc_timeout_secs", "must be non-zero when set"));
    }

    let limits = &config.explorer;
    if limits.max_block_count == 0 {
        errors.push(ValidationError::new("explorer.max_block_count", "must be at least 1"));
    }
    if limits.default_block_count == 0 || limits.default_block_count > limits.max_block_count {
        errors.push(ValidationError::new(
            "explorer.default_block_count",
            format!("must be within 1..={}", limits.max_block_count),
        ));
    }
    if limits.index_block_count == 0 || limits.index_block_count > limits.max_block_count {
        errors.push(ValidationError::new(
            "explorer.index_block_count",
            format!("must be within 1..={}", limits.max_block_count),
        ));
    }
    if limits.max_query_len == 0 {
        errors.push(ValidationError::new("explorer.max_query_len", "must be at least 1"));
    }

    if config.timeouts.request_secs == Some(0) {
        errors.push(ValidationError::new("timeouts.request_secs", "must be non-zero when set"));
    }

    let obs = &config.observability;
    if !matches!(obs.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::new(
            "observability.log_format",
            format!("unknown format '{}' (expected pretty or json)", obs.log_format),
        ));
    }
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", obs.metrics_address),
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be non-zero"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ExplorerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ExplorerConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.node.port = 0;
        config.explorer.default_block_count = 500;
        config.observability.log_format = "xml".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "node.port",
                "explorer.default_block_count",
                "observability.log_format",
            ]
        );
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let mut config = ExplorerConfig::default();
        config.node.rpc_timeout_secs = Some(0);
        config.timeouts.request_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), "node.rpc_timeout_secs: must be non-zero when set");
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ExplorerConfig::default();
        config.observability.metrics_address = "bogus".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
