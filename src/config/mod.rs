//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig
//!     → shared via ArcSwap to both servers
//!
//! On admin write:
//!     handler builds a full replacement snapshot
//!     → atomic swap of Arc<GatewayConfig>
//!     → in-flight requests keep the version they loaded
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Runtime mutation happens only through whole-snapshot replacement,
//!   never field-by-field on a shared value

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AdminConfig, GatewayConfig, ListenerConfig, LlmConfig, ObservabilityConfig, TimeoutConfig,
};
