//! Node RPC client.
//!
//! # Responsibilities
//! - POST one JSON-RPC request per call to the configured node
//! - Authenticate with HTTP Basic auth from the loaded credential
//! - Map transport, decode and node errors into [`RpcError`]
//!
//! # Design Decisions
//! - One-shot calls: no retries, no failover
//! - The response body is decoded whatever the HTTP status, because the
//!   node reports method errors with non-2xx codes and a JSON body
//! - Timeout only when configured

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::config::NodeConfig;
use crate::node::credential::NodeCredential;
use crate::node::types::{NodeRpc, RpcEnvelope, RpcError, RpcRequest, RpcResponse, RpcResult};
use crate::observability::metrics;

/// Request ids only need to be unique for log correlation.
static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// HTTP JSON-RPC client for a single node.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: Url,
    credential: Arc<NodeCredential>,
    timeout: Option<Duration>,
}

impl RpcClient {
    /// Create a client for the node described by `config`.
    pub fn new(config: &NodeConfig, credential: NodeCredential) -> RpcResult<Self> {
        let endpoint = Url::parse(&format!("http://{}:{}/", config.host, config.port)).map_err(
            |e| {
                RpcError::Configuration(format!(
                    "invalid node address {}:{}: {}",
                    config.host, config.port, e
                ))
            },
        )?;

        // One connection per call; nothing is kept idle between calls.
        let http = reqwest::Client::builder()
            .no_proxy()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| RpcError::Configuration(format!("cannot build HTTP client: {}", e)))?;

        tracing::info!(
            endpoint = %endpoint,
            timeout_secs = ?config.rpc_timeout_secs,
            "Node RPC client initialized"
        );

        Ok(Self {
            http,
            endpoint,
            credential: Arc::new(credential),
            timeout: config.rpc_timeout_secs.map(Duration::from_secs),
        })
    }

    /// The URL every call is posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(&self, id: u64, request: &RpcRequest) -> RpcResult<Value> {
        let envelope = RpcEnvelope {
            jsonrpc: "1.0",
            id,
            method: &request.method,
            params: &request.params,
        };

        let mut builder = self
            .http
            .post(self.endpoint.clone())
            .basic_auth(self.credential.user(), Some(self.credential.secret()))
            .json(&envelope);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        let decoded: RpcResponse = serde_json::from_slice(&body)
            .map_err(|e| RpcError::Decode(format!("HTTP {}: {}", status, e)))?;

        decoded.into_result()
    }
}

#[async_trait]
impl NodeRpc for RpcClient {
    async fn call(&self, request: RpcRequest) -> RpcResult<Value> {
        let id = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        let start = Instant::now();

        let result = self.send(id, &request).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::record_rpc_call(&request.method, outcome, start);

        match &result {
            Ok(_) => tracing::debug!(
                rpc_id = id,
                method = %request.method,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "RPC call succeeded"
            ),
            Err(e) if e.is_remote() => tracing::debug!(
                rpc_id = id,
                method = %request.method,
                error = %e,
                "Node rejected RPC call"
            ),
            Err(e) => tracing::warn!(
                rpc_id = id,
                method = %request.method,
                error = %e,
                "RPC call failed"
            ),
        }

        result
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("credential", &self.credential)
            .field("timeout", &self.timeout)
            .finish()
    }
}
