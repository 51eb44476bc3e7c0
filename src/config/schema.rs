//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the explorer.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the explorer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Node RPC endpoint and credential location.
    pub node: NodeConfig,

    /// Page and API limits.
    pub explorer: LimitsConfig,

    /// Inbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Node RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Host the node's RPC interface listens on.
    pub host: String,

    /// RPC port.
    pub port: u16,

    /// Path to the `user:secret` cookie file written by the node.
    pub cookie_path: String,

    /// Per-call timeout in seconds. Unset means calls wait indefinitely.
    pub rpc_timeout_secs: Option<u64>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8336,
            cookie_path: "/root/.tetsuo/.cookie".to_string(),
            rpc_timeout_secs: None,
        }
    }
}

/// Limits applied by the query router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Number of recent blocks on the index page.
    pub index_block_count: u64,

    /// Block count used by `/api/blocks/:n` when `n` is missing or invalid.
    pub default_block_count: u64,

    /// Upper clamp for `/api/blocks/:n`.
    pub max_block_count: u64,

    /// Longest accepted search query, in characters after trimming.
    pub max_query_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            index_block_count: 10,
            default_block_count: 10,
            max_block_count: 100,
            max_query_len: 128,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for one inbound request, in seconds.
    pub request_secs: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ExplorerConfig = toml::from_str(
            r#"
            [node]
            port = 18336
            "#,
        )
        .unwrap();

        assert_eq!(config.node.port, 18336);
        assert_eq!(config.node.host, "127.0.0.1");
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.explorer.max_block_count, 100);
        assert!(config.node.rpc_timeout_secs.is_none());
    }

    #[test]
    fn test_empty_config() {
        let config: ExplorerConfig = toml::from_str("").unwrap();
        assert_eq!(config.explorer.max_query_len, 128);
        assert_eq!(config.node.cookie_path, "/root/.tetsuo/.cookie");
        assert!(config.timeouts.request_secs.is_none());
    }
}
