//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Seed state → Start admin + gateway servers
//!
//! Shutdown (shutdown.rs):
//!     SIGINT → broadcast → both servers drain and exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
