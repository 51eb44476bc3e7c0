//! Node cookie credential.

use std::fs;
use std::path::Path;

use crate::node::types::{RpcError, RpcResult};

/// Username/secret pair used for HTTP Basic auth against the node.
///
/// Loaded once at startup and handed to the client; never re-read.
#[derive(Clone, PartialEq, Eq)]
pub struct NodeCredential {
    user: String,
    secret: String,
}

impl NodeCredential {
    pub fn new(user: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            secret: secret.into(),
        }
    }

    /// Parse `user:secret`. The secret may itself contain colons.
    pub fn parse(raw: &str) -> RpcResult<Self> {
        let (user, secret) = raw.trim().split_once(':').ok_or_else(|| {
            RpcError::Configuration("credential must have the form user:secret".to_string())
        })?;

        if user.is_empty() {
            return Err(RpcError::Configuration("credential user is empty".to_string()));
        }
        if secret.is_empty() {
            return Err(RpcError::Configuration("credential secret is empty".to_string()));
        }

        Ok(Self::new(user, secret))
    }

    /// Read and parse the cookie file at `path`.
    pub fn load(path: &Path) -> RpcResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            RpcError::Configuration(format!("cannot read credential {}: {}", path.display(), e))
        })?;

        let credential = Self::parse(&raw).map_err(|e| match e {
            RpcError::Configuration(msg) => {
                RpcError::Configuration(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;

        tracing::info!(path = %path.display(), user = %credential.user, "Node credential loaded");
        Ok(credential)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for NodeCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeCredential")
            .field("user", &self.user)
            .field("secret", &"<redacted>")
            .finish()
    }
}
