//! Node RPC subsystem.
//!
//! # Data Flow
//! ```text
//! cookie file (user:secret)
//!     → credential.rs (load once at startup, fail fast)
//!     → client.rs (HTTP POST + Basic auth, one call at a time)
//!     → types.rs (JSON-RPC envelope, error taxonomy, NodeRpc seam)
//! ```
//!
//! # Security Constraints
//! - The credential secret is never logged
//! - Credential problems surface before any network I/O

pub mod client;
pub mod credential;
pub mod types;

pub use client::RpcClient;
pub use credential::NodeCredential;
pub use types::{NodeRpc, RpcError, RpcRequest, RpcResponse, RpcResult};
