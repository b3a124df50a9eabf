//! Conversation history replayed to the model.
//!
//! # Design Decisions
//! - Append-only; messages are immutable once pushed
//! - Reset on restart to exactly two seed messages (system meta prompt,
//!   user service prompt), each wrapped in double braces

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only dialogue with the model.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
}

impl ConversationStore {
    /// Create a store already seeded for the given prompts.
    pub fn seeded(meta_prompt: &str, prompt: &str) -> Self {
        let mut store = Self::default();
        store.reseed(meta_prompt, prompt);
        store
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replace the history with the two seed messages.
    pub fn reseed(&mut self, meta_prompt: &str, prompt: &str) {
        self.messages = vec![
            Message::system(wrap_seed(meta_prompt)),
            Message::user(wrap_seed(prompt)),
        ];
    }

    /// Clone of the full history, for dispatch outside the state lock.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

/// Seed messages carry their prompt wrapped in double braces.
fn wrap_seed(prompt: &str) -> String {
    format!("{{{{{prompt}}}}}")
}
