//! Search disambiguation.
//!
//! A query is a block height when it is all decimal digits and a block hash
//! or transaction id when it is exactly 64 hex characters. Heights are tried
//! first; a failed height lookup falls through to the hash/txid checks.
//! Queries that match neither shape never reach the node.

use serde_json::{json, Value};
use thiserror::Error;

use crate::explorer::chain::{block_by_hash, block_hash_for};
use crate::node::{NodeRpc, RpcError, RpcRequest};

/// Length of a hex-encoded block hash or transaction id.
pub const HEX_ID_LEN: usize = 64;

/// Why a search did not resolve to a block.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("empty search: enter a block height, block hash or transaction id")]
    Empty,

    #[error("query too long (max {max} characters)")]
    TooLong { max: usize },

    #[error("{0}: not found")]
    NotFound(String),

    /// The node could not be asked at all.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

/// True for a non-empty string of ASCII decimal digits.
pub fn is_decimal(query: &str) -> bool {
    !query.is_empty() && query.bytes().all(|b| b.is_ascii_digit())
}

/// True for exactly 64 hexadecimal characters, either case.
pub fn is_hex_id(query: &str) -> bool {
    query.len() == HEX_ID_LEN && query.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Resolve a user query to the hash of the block it identifies.
pub async fn resolve(rpc: &dyn NodeRpc, raw: &str, max_len: usize) -> Result<String, SearchError> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(SearchError::Empty);
    }
    if query.chars().count() > max_len {
        return Err(SearchError::TooLong { max: max_len });
    }

    if is_decimal(query) {
        // Digits wider than u64 still go to the node, as a float.
        let height = match query.parse::<u64>() {
            Ok(height) => json!(height),
            Err(_) => query.parse::<f64>().map(|h| json!(h)).unwrap_or(Value::Null),
        };
        match block_hash_for(rpc, height).await {
            Ok(hash) => return Ok(hash),
            Err(e) if e.is_remote() => {
                tracing::debug!(query, error = %e, "Height lookup failed, trying other forms");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if is_hex_id(query) {
        match block_by_hash(rpc, query).await {
            Ok(block) if !block.is_null() => return Ok(query.to_string()),
            Ok(_) => {}
            Err(e) if e.is_remote() => {
                tracing::debug!(error = %e, "Not a block hash, trying as transaction id");
            }
            Err(e) => return Err(e.into()),
        }

        match containing_block(rpc, query).await {
            Ok(Some(hash)) => return Ok(hash),
            Ok(None) => {}
            Err(e) if e.is_remote() => {
                tracing::debug!(error = %e, "Not a transaction id either");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(SearchError::NotFound(query.to_string()))
}

/// Hash of the block containing transaction `txid`, if it is mined.
async fn containing_block(rpc: &dyn NodeRpc, txid: &str) -> Result<Option<String>, RpcError> {
    let tx = rpc
        .call(RpcRequest::new("getrawtransaction", vec![json!(txid), json!(true)]))
        .await?;

    Ok(tx
        .get("blockhash")
        .and_then(Value::as_str)
        .filter(|hash| is_hex_id(hash))
        .map(str::to_owned))
}
