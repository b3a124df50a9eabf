//! Request-to-prompt encoding.
//!
//! # Responsibilities
//! - Substitute `{path}` and `{request}` into the service-prompt template
//! - Reconstruct the raw request text losslessly (method line, headers in
//!   receipt order, blank line, body)
//! - Combine meta prompt and rendered prompt into one outbound message
//!
//! # Design Decisions
//! - No escaping: the model receives plain text
//! - Pure transform; appending to the conversation and logs is the
//!   caller's job

use crate::state::conversation::Message;

/// Template placeholder replaced with the request path.
pub const PATH_PLACEHOLDER: &str = "{path}";
/// Template placeholder replaced with the full raw request text.
pub const REQUEST_PLACEHOLDER: &str = "{request}";

/// The pieces of an inbound HTTP request the codec needs.
#[derive(Debug, Clone)]
pub struct RequestParts {
    /// HTTP method, e.g. `GET`.
    pub method: String,
    /// Path including the query string, e.g. `/x?y=1`.
    pub path: String,
    /// Headers in receipt order.
    pub headers: Vec<(String, String)>,
    /// Decoded request body (empty when absent).
    pub body: String,
}

/// A fully rendered outbound prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPrompt {
    /// The meta prompt in effect when the prompt was built.
    pub meta_prompt: String,
    /// The rendered service-prompt body.
    pub prompt: String,
}

impl EncodedPrompt {
    /// The outbound user message: meta prompt and prompt body joined by a
    /// newline.
    pub fn message(&self) -> Message {
        Message::user(format!("{}\n{}", self.meta_prompt, self.prompt))
    }
}

/// Render the service-prompt template against an inbound request.
///
/// `{path}` is always substituted; `{request}` is substituted only when the
/// template asks for it, to avoid reconstructing the raw request needlessly.
pub fn encode(template: &str, meta_prompt: &str, request: &RequestParts) -> EncodedPrompt {
    let mut prompt = template.replace(PATH_PLACEHOLDER, &request.path);
    if prompt.contains(REQUEST_PLACEHOLDER) {
        prompt = prompt.replace(REQUEST_PLACEHOLDER, &raw_request_text(request));
    }
    EncodedPrompt {
        meta_prompt: meta_prompt.to_string(),
        prompt,
    }
}

/// Reconstruct the raw request text: `<METHOD> <path> HTTP/1.1`, each header
/// as `Key: Value` in receipt order, a blank line, then the body.
pub fn raw_request_text(request: &RequestParts) -> String {
    let mut text = format!("{} {} HTTP/1.1\n", request.method, request.path);
    for (key, value) in &request.headers {
        text.push_str(key);
        text.push_str(": ");
        text.push_str(value);
        text.push('\n');
    }
    text.push('\n');
    text.push_str(&request.body);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RequestParts {
        RequestParts {
            method: "POST".into(),
            path: "/submit?a=1".into(),
            headers: vec![
                ("host".into(), "localhost".into()),
                ("content-type".into(), "text/plain".into()),
            ],
            body: "name=Bob".into(),
        }
    }

    #[test]
    fn test_path_substitution() {
        let encoded = encode("Serve {path} please", "meta", &request());
        assert_eq!(encoded.prompt, "Serve /submit?a=1 please");
        assert_eq!(encoded.meta_prompt, "meta");
    }

    #[test]
    fn test_raw_request_is_lossless() {
        let encoded = encode("{request}", "meta", &request());
        assert_eq!(
            encoded.prompt,
            "POST /submit?a=1 HTTP/1.1\n\
             host: localhost\n\
             content-type: text/plain\n\
             \n\
             name=Bob"
        );
    }

    #[test]
    fn test_request_not_rendered_unless_requested() {
        // A template without {request} should not pull the body in.
        let encoded = encode("Just {path}", "meta", &request());
        assert!(!encoded.prompt.contains("name=Bob"));
    }

    #[test]
    fn test_message_combines_meta_and_prompt() {
        let encoded = encode("Serve {path}", "Reply as HTTP", &request());
        let message = encoded.message();
        assert_eq!(message.content, "Reply as HTTP\nServe /submit?a=1");
    }
}
