//! Query router core.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → Explorer (decides which node calls, in what order)
//!         → chain.rs  (summary, tip, recent blocks, block by hash)
//!         → search.rs (height / hash / txid disambiguation)
//!         → wallet.rs (balance, utxos, broadcast)
//!     → NodeRpc (one sequential call at a time)
//! ```
//!
//! Nothing here knows about HTTP; handlers map the results to responses.

pub mod chain;
pub mod search;
pub mod wallet;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use serde_json::Value;

use crate::config::LimitsConfig;
use crate::node::{NodeRpc, RpcResult};

pub use search::SearchError;
pub use wallet::{BalanceReply, UtxoReply};

/// Data assembled for the index page.
#[derive(Debug, Clone)]
pub struct IndexView {
    pub summary: Value,
    pub blocks: Vec<Value>,
}

/// Explorer operations bound to one node and one set of limits.
#[derive(Clone)]
pub struct Explorer {
    rpc: Arc<dyn NodeRpc>,
    limits: LimitsConfig,
}

impl Explorer {
    pub fn new(rpc: Arc<dyn NodeRpc>, limits: LimitsConfig) -> Self {
        Self { rpc, limits }
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Chain info with the peer connection count merged in.
    pub async fn chain_summary(&self) -> RpcResult<Value> {
        chain::chain_summary(self.rpc.as_ref()).await
    }

    /// Chain summary plus the newest blocks for the index page.
    pub async fn index(&self) -> RpcResult<IndexView> {
        let summary = self.chain_summary().await?;
        let tip = chain::tip_height(&summary)?;
        let blocks =
            chain::recent_blocks(self.rpc.as_ref(), tip, self.limits.index_block_count).await?;
        Ok(IndexView { summary, blocks })
    }

    /// Newest blocks for `/api/blocks/:n`; `raw_count` is the unparsed `n`.
    pub async fn recent_blocks(&self, raw_count: Option<&str>) -> RpcResult<Vec<Value>> {
        let count = chain::parse_block_count(raw_count, &self.limits);
        let tip = chain::current_height(self.rpc.as_ref()).await?;
        chain::recent_blocks(self.rpc.as_ref(), tip, count).await
    }

    pub async fn block(&self, hash: &str) -> RpcResult<Value> {
        chain::block_by_hash(self.rpc.as_ref(), hash).await
    }

    /// Resolve a search query to a block hash.
    pub async fn search(&self, query: &str) -> Result<String, SearchError> {
        search::resolve(self.rpc.as_ref(), query, self.limits.max_query_len).await
    }

    pub async fn balance(&self, address: &str) -> BalanceReply {
        wallet::balance(self.rpc.as_ref(), address).await
    }

    pub async fn utxos(&self, address: &str) -> UtxoReply {
        wallet::utxos(self.rpc.as_ref(), address).await
    }

    pub async fn broadcast(&self, hex: &str) -> RpcResult<String> {
        wallet::broadcast(self.rpc.as_ref(), hex).await
    }
}
