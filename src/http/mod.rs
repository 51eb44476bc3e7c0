//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → api.rs / pages.rs (handlers over the explorer)
//!     → response.rs (error mapping), render.rs (HTML)
//!     → Send to client
//! ```

pub mod api;
pub mod pages;
pub mod render;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
