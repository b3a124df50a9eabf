//! HTTP gateway subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, one handler for every verb)
//!     → codec::encode (request → prompt)
//!     → llm dispatch
//!     → codec::decode (reply → status/headers/meta/body)
//!     → state (conversation + logs)
//!     → response to client
//! ```

pub mod server;

pub use server::{gateway_router, AppState, GatewayServer};
