//! Block explorer front-end for a blockchain full node.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser / API client
//!            │
//!            ▼
//!     ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//!     │    http     │────▶│   explorer   │────▶│    node     │────▶ full node
//!     │ axum routes │     │ query router │     │ RPC client  │      JSON-RPC
//!     └─────────────┘     └──────────────┘     └─────────────┘
//!
//!     Cross-cutting: config, observability, security, lifecycle
//! ```
//!
//! The explorer owns no data: every page and API response is assembled from
//! sequential node calls made while serving that request.

pub mod config;
pub mod explorer;
pub mod http;
pub mod lifecycle;
pub mod node;
pub mod observability;
pub mod security;

pub use config::schema::ExplorerConfig;
pub use explorer::Explorer;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use node::{NodeRpc, RpcClient, RpcError};
