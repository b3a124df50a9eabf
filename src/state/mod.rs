//! Shared gateway state.
//!
//! # Data Flow
//! ```text
//! Gateway handler / admin handlers
//!     → lock GatewayState (tokio Mutex)
//!     → append to ConversationStore / LogStore
//!     → release before any LLM dispatch
//! ```
//!
//! # Design Decisions
//! - One exclusive lock over both stores keeps each request's entries
//!   internally ordered under concurrency
//! - The lock is held only around appends and snapshots, never across the
//!   external LLM call
//! - Restart clears and reseeds under the same lock, so it cannot race a
//!   request's LOG step

pub mod conversation;
pub mod logs;

pub use conversation::{ConversationStore, Message, Role};
pub use logs::{Direction, LogEntry, LogStore, MetaLogEntry};

/// Process-wide mutable state: conversation history plus both logs.
#[derive(Debug, Default)]
pub struct GatewayState {
    pub conversation: ConversationStore,
    pub logs: LogStore,
}

impl GatewayState {
    /// State seeded for the given prompts, as required at startup and after
    /// every restart.
    pub fn seeded(meta_prompt: &str, prompt: &str) -> Self {
        Self {
            conversation: ConversationStore::seeded(meta_prompt, prompt),
            logs: LogStore::default(),
        }
    }

    /// Clear both logs and reseed the conversation.
    pub fn reset(&mut self, meta_prompt: &str, prompt: &str) {
        self.logs.clear();
        self.conversation.reseed(meta_prompt, prompt);
    }
}
