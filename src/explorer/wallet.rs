//! Wallet passthroughs: address balance, unspent outputs, raw broadcast.
//!
//! Balance and UTXO lookups never fail: any problem yields a zero/empty
//! reply carrying an `error` string. Broadcast does fail, so the caller can
//! tell a rejected transaction apart from an accepted one.

use serde::Serialize;
use serde_json::{json, Value};

use crate::node::{NodeRpc, RpcError, RpcRequest, RpcResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReply {
    pub balance: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtxoReply {
    pub utxos: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Descriptor scoping a UTXO-set scan to one address.
pub fn address_descriptor(address: &str) -> String {
    format!("addr({address})")
}

/// Base58 and bech32 addresses are plain alphanumerics; anything else could
/// smuggle extra descriptor syntax into the scan.
fn check_address(address: &str) -> RpcResult<()> {
    if !address.is_empty() && address.bytes().all(|b| b.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(RpcError::Remote {
            code: -5,
            message: format!("Invalid address: {address}"),
        })
    }
}

async fn scan(rpc: &dyn NodeRpc, address: &str) -> RpcResult<Value> {
    check_address(address)?;
    rpc.call(RpcRequest::new(
        "scantxoutset",
        vec![json!("start"), json!([address_descriptor(address)])],
    ))
    .await
}

fn field_or(result: &Value, key: &str, default: Value) -> Value {
    match result.get(key) {
        Some(v) if !v.is_null() => v.clone(),
        _ => default,
    }
}

/// Aggregate unspent amount held by `address`.
pub async fn balance(rpc: &dyn NodeRpc, address: &str) -> BalanceReply {
    match scan(rpc, address).await {
        Ok(result) => BalanceReply {
            balance: field_or(&result, "total_amount", json!(0)),
            error: None,
        },
        Err(e) => {
            tracing::warn!(address, error = %e, "Balance scan failed, reporting zero");
            BalanceReply {
                balance: json!(0),
                error: Some(e.client_message()),
            }
        }
    }
}

/// Unspent outputs held by `address`, exactly as the node lists them.
pub async fn utxos(rpc: &dyn NodeRpc, address: &str) -> UtxoReply {
    match scan(rpc, address).await {
        Ok(result) => UtxoReply {
            utxos: field_or(&result, "unspents", json!([])),
            error: None,
        },
        Err(e) => {
            tracing::warn!(address, error = %e, "UTXO scan failed, reporting none");
            UtxoReply {
                utxos: json!([]),
                error: Some(e.client_message()),
            }
        }
    }
}

/// Forward a signed raw transaction verbatim; returns its txid.
pub async fn broadcast(rpc: &dyn NodeRpc, hex: &str) -> RpcResult<String> {
    let txid = rpc
        .call(RpcRequest::new("sendrawtransaction", vec![json!(hex)]))
        .await?;
    match txid {
        Value::String(txid) => {
            tracing::info!(txid = %txid, "Transaction broadcast");
            Ok(txid)
        }
        other => Err(RpcError::Decode(format!("sendrawtransaction returned {}", other))),
    }
}
