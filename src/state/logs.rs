//! Transaction and meta-commentary logs.
//!
//! # Responsibilities
//! - Record HTTP transactions and meta-channel traffic in emission order
//! - Mirror the meta subset of the transaction log into the meta log for
//!   the dashboard view
//!
//! # Design Decisions
//! - Append-only and unbounded, as in the original service; capping is a
//!   deployment concern
//! - Serialized field names match the dashboard's JSON consumers exactly

use serde::Serialize;

/// One entry of the transaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntry {
    /// Prompt text sent to the model.
    MetaOut { text: String },
    /// Meta commentary received from the model.
    MetaIn { text: String },
    /// A completed HTTP transaction.
    Http {
        request: String,
        status: u16,
        response: String,
        error: bool,
    },
}

/// Direction of a meta-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Out,
    In,
}

/// One entry of the meta log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaLogEntry {
    pub direction: Direction,
    pub text: String,
}

/// The two parallel append-only logs.
#[derive(Debug, Default)]
pub struct LogStore {
    entries: Vec<LogEntry>,
    meta_entries: Vec<MetaLogEntry>,
}

impl LogStore {
    /// Record outbound prompt text in both logs.
    pub fn meta_out(&mut self, text: &str) {
        self.entries.push(LogEntry::MetaOut {
            text: text.to_string(),
        });
        self.meta(Direction::Out, text);
    }

    /// Record inbound meta commentary in both logs.
    pub fn meta_in(&mut self, text: &str) {
        self.entries.push(LogEntry::MetaIn {
            text: text.to_string(),
        });
        self.meta(Direction::In, text);
    }

    /// Record a meta-log-only entry (used by the admin meta chat).
    pub fn meta(&mut self, direction: Direction, text: &str) {
        self.meta_entries.push(MetaLogEntry {
            direction,
            text: text.to_string(),
        });
    }

    /// Record a completed HTTP transaction.
    pub fn http(&mut self, request: &str, status: u16, response: &str, error: bool) {
        self.entries.push(LogEntry::Http {
            request: request.to_string(),
            status,
            response: response.to_string(),
            error,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.meta_entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn meta_entries(&self) -> &[MetaLogEntry] {
        &self.meta_entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_out_mirrors_into_meta_log() {
        let mut logs = LogStore::default();
        logs.meta_out("prompt text");
        assert_eq!(logs.entries().len(), 1);
        assert_eq!(logs.meta_entries().len(), 1);
        assert_eq!(logs.meta_entries()[0].direction, Direction::Out);
    }

    #[test]
    fn test_meta_only_skips_transaction_log() {
        let mut logs = LogStore::default();
        logs.meta(Direction::Out, "chat message");
        assert!(logs.entries().is_empty());
        assert_eq!(logs.meta_entries().len(), 1);
    }

    #[test]
    fn test_http_entry_serialization() {
        let mut logs = LogStore::default();
        logs.http("/test", 500, "LLM error: missing key", true);
        let json = serde_json::to_value(&logs.entries()[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "http",
                "request": "/test",
                "status": 500,
                "response": "LLM error: missing key",
                "error": true,
            })
        );
    }

    #[test]
    fn test_meta_entry_serialization() {
        let mut logs = LogStore::default();
        logs.meta_in("noted");
        let json = serde_json::to_value(&logs.meta_entries()[0]).unwrap();
        assert_eq!(json, serde_json::json!({"direction": "in", "text": "noted"}));
    }
}
