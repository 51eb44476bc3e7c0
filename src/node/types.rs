//! Wire types, the error taxonomy and the RPC seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while talking to the node.
///
/// Callers branch on the variant: a [`RpcError::Remote`] usually means the
/// thing asked for does not exist, everything else is an operational failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RpcError {
    /// Credential missing, unreadable or malformed, or the endpoint is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Connection refused, reset, timed out, or any other network failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered with something that is not a JSON-RPC response.
    #[error("decode error: {0}")]
    Decode(String),

    /// The node returned a structured error for this method/params.
    #[error("node error {code}: {message}")]
    Remote { code: i64, message: String },
}

impl RpcError {
    /// True when the node itself rejected the call.
    pub fn is_remote(&self) -> bool {
        matches!(self, RpcError::Remote { .. })
    }

    /// Message suitable for a client-facing `{"error": ...}` body.
    ///
    /// Remote errors surface the node's own message verbatim.
    pub fn client_message(&self) -> String {
        match self {
            RpcError::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RpcError::Configuration(_) => "configuration",
            RpcError::Transport(_) => "transport",
            RpcError::Decode(_) => "decode",
            RpcError::Remote { .. } => "remote",
        }
    }
}

/// Result type for node operations.
pub type RpcResult<T> = Result<T, RpcError>;

/// A single method invocation: name plus ordered positional parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest {
    pub method: String,
    pub params: Vec<Value>,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// A call with no parameters.
    pub fn bare(method: impl Into<String>) -> Self {
        Self::new(method, Vec::new())
    }
}

/// JSON body posted to the node.
#[derive(Debug, Serialize)]
pub(crate) struct RpcEnvelope<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a [Value],
}

/// JSON body returned by the node. Exactly one of the fields is non-null.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Value,
}

impl RpcResponse {
    /// Split the response into the success payload or a [`RpcError::Remote`].
    pub fn into_result(self) -> RpcResult<Value> {
        match self.error {
            Value::Null => Ok(self.result),
            Value::Object(map) => Err(RpcError::Remote {
                code: map.get("code").and_then(Value::as_i64).unwrap_or(0),
                message: map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown node error")
                    .to_string(),
            }),
            Value::String(message) => Err(RpcError::Remote { code: 0, message }),
            other => Err(RpcError::Remote {
                code: 0,
                message: other.to_string(),
            }),
        }
    }
}

/// Anything that can answer node RPC calls.
///
/// The query router only sees this trait, so it can run against the real
/// HTTP client or an in-memory node.
#[async_trait]
pub trait NodeRpc: Send + Sync {
    async fn call(&self, request: RpcRequest) -> RpcResult<Value>;
}
