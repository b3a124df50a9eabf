//! Prompt/reply codec subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound HTTP request
//!     → encode.rs (template substitution → outbound message content)
//!     → [conversation + LLM dispatch happen elsewhere]
//!     → decode.rs (reply text → status, headers, meta lines, body)
//! ```
//!
//! # Design Decisions
//! - Pure functions only; the codec owns no state and does no I/O
//! - Decode is best-effort and total: any input yields a usable reply
//! - The `{{{...}}}` meta grammar is reproduced as documented, including
//!   its known ambiguities (a body line starting with `HTTP/` is taken
//!   as a status line)

pub mod decode;
pub mod encode;

pub use decode::{decode, DecodedReply};
pub use encode::{encode, EncodedPrompt, RequestParts};

/// Opening delimiter of a meta line.
pub const META_OPEN: &str = "{{{";
/// Closing delimiter of a meta line.
pub const META_CLOSE: &str = "}}}";
