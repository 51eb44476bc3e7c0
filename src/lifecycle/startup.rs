//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Config first, then credential, then the node client, then the server
//! - The listener is bound by the caller, last (traffic only when ready)

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::validation::validate_config;
use crate::config::{load_config, ConfigError, ExplorerConfig, NodeConfig};
use crate::http::HttpServer;
use crate::node::{NodeCredential, RpcClient, RpcError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Node(#[from] RpcError),
}

/// Load configuration from `path` (or defaults) and apply the bind override.
pub fn load(path: Option<&Path>, bind: Option<String>) -> Result<ExplorerConfig, StartupError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ExplorerConfig::default(),
    };

    if let Some(bind) = bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Read the node credential and build the RPC client.
pub fn connect_node(config: &NodeConfig) -> Result<RpcClient, StartupError> {
    let credential = NodeCredential::load(Path::new(&config.cookie_path))?;
    Ok(RpcClient::new(config, credential)?)
}

/// Everything up to, but not including, binding the listener.
pub fn build_server(config: ExplorerConfig) -> Result<HttpServer, StartupError> {
    let client = connect_node(&config.node)?;
    Ok(HttpServer::new(config, Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = load(None, None).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn test_bind_override_is_validated() {
        let config = load(None, Some("0.0.0.0:4000".into())).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:4000");

        let err = load(None, Some("not-an-address".into())).unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Validation(_))));
    }

    #[test]
    fn test_missing_credential_fails_before_serving() {
        let mut config = ExplorerConfig::default();
        config.node.cookie_path = "/nonexistent/.cookie".into();

        match build_server(config) {
            Err(StartupError::Node(RpcError::Configuration(_))) => {}
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("server built without a credential"),
        }
    }

    #[test]
    fn test_server_built_with_credential() {
        let mut cookie = tempfile::NamedTempFile::new().unwrap();
        write!(cookie, "__cookie__:abc").unwrap();

        let mut config = ExplorerConfig::default();
        config.node.cookie_path = cookie.path().display().to_string();

        let server = build_server(config).unwrap();
        assert_eq!(server.config().node.port, 8336);
    }
}
