//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ExplorerConfig (validated, immutable)
//!     → handed to the RPC client and HTTP server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::ExplorerConfig;
pub use schema::{
    LimitsConfig, ListenerConfig, NodeConfig, ObservabilityConfig, SecurityConfig, TimeoutConfig,
};
pub use validation::ValidationError;
