//! In-memory node for router tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::node::{NodeRpc, RpcError, RpcRequest, RpcResult};

pub fn block_hash(height: u64) -> String {
    format!("{:064x}", 0xb0000 + height)
}

pub fn txid(height: u64) -> String {
    format!("{:064x}", 0xf0000 + height)
}

/// Chain of `tip + 1` blocks, one transaction each.
pub struct FakeNode {
    tip: u64,
    /// Every RPC method invoked, in order.
    pub calls: Mutex<Vec<String>>,
    /// When set, every call fails with this error instead.
    pub fail_with: Option<RpcError>,
    /// Per-address `scantxoutset` results; unknown addresses get a remote error.
    pub scans: HashMap<String, Value>,
}

impl FakeNode {
    pub fn new(tip: u64) -> Self {
        Self {
            tip,
            calls: Mutex::new(Vec::new()),
            fail_with: None,
            scans: HashMap::new(),
        }
    }

    pub fn failing(error: RpcError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::new(0)
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn height_of_hash(&self, hash: &str) -> Option<u64> {
        (0..=self.tip).find(|h| block_hash(*h) == hash)
    }

    fn block(&self, height: u64) -> Value {
        let mut block = json!({
            "hash": block_hash(height),
            "height": height,
            "time": 1_700_000_000 + height * 60,
            "nTx": 1,
            "tx": [txid(height)],
            "difficulty": 1.5,
            "nonce": 7,
            "versionHex": "20000000",
            "merkleroot": txid(height),
            "size": 250,
            "weight": 1000,
        });
        if height > 0 {
            block["previousblockhash"] = json!(block_hash(height - 1));
        }
        if height < self.tip {
            block["nextblockhash"] = json!(block_hash(height + 1));
        }
        block
    }
}

fn not_found(code: i64, message: &str) -> RpcError {
    RpcError::Remote {
        code,
        message: message.to_string(),
    }
}

#[async_trait]
impl NodeRpc for FakeNode {
    async fn call(&self, request: RpcRequest) -> RpcResult<Value> {
        self.calls.lock().unwrap().push(request.method.clone());

        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        let params = &request.params;
        match request.method.as_str() {
            "getblockchaininfo" => Ok(json!({
                "chain": "main",
                "blocks": self.tip,
                "difficulty": 1.5,
            })),
            "getnetworkinfo" => Ok(json!({"connections": 8, "version": 250000})),
            "getblockhash" => match params.first().and_then(Value::as_u64) {
                Some(h) if h <= self.tip => Ok(json!(block_hash(h))),
                _ => Err(not_found(-8, "Block height out of range")),
            },
            "getblock" => params
                .first()
                .and_then(Value::as_str)
                .and_then(|hash| self.height_of_hash(&hash.to_lowercase()))
                .map(|h| self.block(h))
                .ok_or_else(|| not_found(-5, "Block not found")),
            "getrawtransaction" => params
                .first()
                .and_then(Value::as_str)
                .and_then(|id| (0..=self.tip).find(|h| txid(*h) == id))
                .map(|h| json!({"txid": txid(h), "blockhash": block_hash(h)}))
                .ok_or_else(|| {
                    not_found(-5, "No such mempool or blockchain transaction")
                }),
            "scantxoutset" => {
                let descriptor = params
                    .get(1)
                    .and_then(|d| d.get(0))
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                self.scans
                    .get(descriptor)
                    .cloned()
                    .ok_or_else(|| not_found(-5, "Invalid descriptor"))
            }
            "sendrawtransaction" => match params.first().and_then(Value::as_str) {
                Some(hex) if hex.starts_with("02") => Ok(json!(txid(9999))),
                _ => Err(not_found(-26, "bad-txns-inputs-missingorspent")),
            },
            other => Err(not_found(-32601, &format!("Method not found: {other}"))),
        }
    }
}
