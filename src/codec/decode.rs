//! Reply-to-response decoding.
//!
//! # Responsibilities
//! - Strip leading/trailing `{{{...}}}` meta lines from a model reply
//! - Parse an optional `HTTP/<ver> <code> <reason>` status line and
//!   `Key: Value` headers
//! - Hand the remainder back as the response body
//!
//! # Design Decisions
//! - Decoding never fails; unrecognizable input becomes a plain body
//! - Best-effort grammar reproduced as documented: a body line that
//!   happens to start with `HTTP/` is treated as a status line, and
//!   malformed triple-brace tokens are not special-cased
//! - Header order is kept; an exact duplicate key overwrites in place

use std::collections::VecDeque;

use crate::codec::{META_CLOSE, META_OPEN};

/// The structured form of a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedReply {
    /// Meta lines found before the status line / body.
    pub leading_meta: Vec<String>,
    /// HTTP status code (the caller's default when no status line parsed).
    pub status: u16,
    /// Headers in reply order.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: String,
    /// Meta lines found after the body, in their original order.
    pub trailing_meta: Vec<String>,
}

/// Decode a raw model reply.
///
/// `default_status` is used when the reply carries no recognizable status
/// line: 200 for a real reply, 500 when the caller is reporting an upstream
/// failure.
pub fn decode(reply: &str, default_status: u16) -> DecodedReply {
    let mut lines: VecDeque<&str> = reply.lines().collect();
    let mut leading_meta = Vec::new();
    let mut trailing_meta = Vec::new();
    let mut headers: Vec<(String, String)> = Vec::new();
    let mut status = default_status;

    drop_leading_blanks(&mut lines);

    while let Some(inner) = lines.front().and_then(|line| meta_inner(line)) {
        leading_meta.push(inner);
        lines.pop_front();
    }

    drop_leading_blanks(&mut lines);

    if lines
        .front()
        .is_some_and(|line| line.trim().starts_with("HTTP/"))
    {
        if let Some(line) = lines.pop_front() {
            if let Some(code) = line.trim().split_whitespace().nth(1) {
                if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) {
                    if let Ok(code) = code.parse() {
                        status = code;
                    }
                }
            }
        }
        // Headers run until the first blank line, which is consumed too.
        while let Some(line) = lines.pop_front() {
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            if let Some((key, value)) = line.split_once(':') {
                insert_header(&mut headers, key.trim(), value.trim());
            }
        }
    }

    while let Some(inner) = lines.back().and_then(|line| meta_inner(line)) {
        trailing_meta.insert(0, inner);
        lines.pop_back();
        while lines.back().is_some_and(|line| line.trim().is_empty()) {
            lines.pop_back();
        }
    }

    DecodedReply {
        leading_meta,
        status,
        headers,
        body: lines.into_iter().collect::<Vec<_>>().join("\n"),
        trailing_meta,
    }
}

fn drop_leading_blanks(lines: &mut VecDeque<&str>) {
    while lines.front().is_some_and(|line| line.trim().is_empty()) {
        lines.pop_front();
    }
}

/// Extract the inner text of a meta line, or None if the line is not one.
fn meta_inner(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let inner = trimmed
        .strip_prefix(META_OPEN)?
        .strip_suffix(META_CLOSE)?;
    Some(inner.trim().to_string())
}

fn insert_header(headers: &mut Vec<(String, String)>, key: &str, value: &str) {
    if let Some(existing) = headers.iter_mut().find(|(k, _)| k == key) {
        existing.1 = value.to_string();
    } else {
        headers.push((key.to_string(), value.to_string()));
    }
}
