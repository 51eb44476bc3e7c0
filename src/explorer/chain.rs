//! Chain summary and block listing.
//!
//! Every operation here issues its RPC calls one after another; later calls
//! depend on earlier results (tip height, then hash, then block body).

use serde_json::{json, Value};

use crate::config::LimitsConfig;
use crate::node::{NodeRpc, RpcError, RpcRequest, RpcResult};

/// `getblockchaininfo` with `connections` from `getnetworkinfo` merged in.
///
/// Either call failing fails the whole summary.
pub async fn chain_summary(rpc: &dyn NodeRpc) -> RpcResult<Value> {
    let mut info = rpc.call(RpcRequest::bare("getblockchaininfo")).await?;
    let network = rpc.call(RpcRequest::bare("getnetworkinfo")).await?;

    let Value::Object(fields) = &mut info else {
        return Err(RpcError::Decode("getblockchaininfo did not return an object".into()));
    };
    if let Some(connections) = network.get("connections") {
        fields.insert("connections".to_string(), connections.clone());
    }

    Ok(info)
}

/// Tip height as reported in a `getblockchaininfo` result.
pub fn tip_height(info: &Value) -> RpcResult<u64> {
    info.get("blocks")
        .and_then(Value::as_u64)
        .ok_or_else(|| RpcError::Decode("chain info has no numeric 'blocks' field".into()))
}

/// Fetch only the tip height.
pub async fn current_height(rpc: &dyn NodeRpc) -> RpcResult<u64> {
    let info = rpc.call(RpcRequest::bare("getblockchaininfo")).await?;
    tip_height(&info)
}

/// Hash of the block at `height`.
pub async fn block_hash_at(rpc: &dyn NodeRpc, height: u64) -> RpcResult<String> {
    block_hash_for(rpc, json!(height)).await
}

/// `getblockhash` with the height already encoded, so digit strings wider
/// than `u64` still reach the node as a number.
pub(crate) async fn block_hash_for(rpc: &dyn NodeRpc, height: Value) -> RpcResult<String> {
    let hash = rpc
        .call(RpcRequest::new("getblockhash", vec![height]))
        .await?;
    hash.as_str()
        .map(str::to_owned)
        .ok_or_else(|| RpcError::Decode(format!("getblockhash returned {}", hash)))
}

/// Full block body, passed through untouched.
pub async fn block_by_hash(rpc: &dyn NodeRpc, hash: &str) -> RpcResult<Value> {
    rpc.call(RpcRequest::new("getblock", vec![json!(hash)])).await
}

/// The `count` newest blocks at or below `tip`, newest first.
///
/// Stops at genesis, so fewer than `count` blocks come back on a short chain.
pub async fn recent_blocks(rpc: &dyn NodeRpc, tip: u64, count: u64) -> RpcResult<Vec<Value>> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let lowest = tip.saturating_sub(count - 1);
    let mut blocks = Vec::with_capacity((tip - lowest + 1) as usize);
    for height in (lowest..=tip).rev() {
        let hash = block_hash_at(rpc, height).await?;
        blocks.push(block_by_hash(rpc, &hash).await?);
    }
    Ok(blocks)
}

/// Interpret the `n` of `/api/blocks/:n`.
///
/// Only the leading integer counts, so `5abc` is 5 and `3.7` is 3. Missing,
/// non-numeric or zero falls back to the default; a negative count is 1 and
/// anything else is capped at `max_block_count`.
pub fn parse_block_count(raw: Option<&str>, limits: &LimitsConfig) -> u64 {
    match raw.and_then(leading_integer) {
        None | Some((_, 0)) => limits.default_block_count,
        Some((true, _)) => 1,
        Some((false, n)) => n.min(limits.max_block_count).max(1),
    }
}

/// Sign and magnitude of the integer prefix of `raw`, saturating at `u64::MAX`.
fn leading_integer(raw: &str) -> Option<(bool, u64)> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    });
    Some((negative, magnitude))
}
