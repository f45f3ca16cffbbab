//! Helpers for building tool-call log payloads.
//!
//! Payloads are serialized, passed through [`redact_sensitive`] and capped in
//! size before they reach the log.

use payline_util::redact_sensitive;
use serde_json::{Map, Value};

const MAX_LOG_PAYLOAD_BYTES: usize = 16 * 1024;

/// Builds the redacted `{request, response}` payload for one tool call.
///
/// Returns `None` when both values are absent.
pub(crate) fn build_log_payload(request: Option<Value>, response: Option<Value>) -> Option<String> {
    let mut payload = Map::new();
    if let Some(request_value) = request {
        payload.insert("request".to_string(), request_value);
    }
    if let Some(response_value) = response {
        payload.insert("response".to_string(), response_value);
    }
    if payload.is_empty() {
        return None;
    }
    let serialized = serde_json::to_string(&Value::Object(payload)).ok()?;
    Some(truncate_to_boundary(redact_sensitive(&serialized)))
}

fn truncate_to_boundary(mut text: String) -> String {
    if text.len() <= MAX_LOG_PAYLOAD_BYTES {
        return text;
    }
    let mut cut = MAX_LOG_PAYLOAD_BYTES;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    text.push_str("...<truncated>");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn secrets_in_arguments_are_redacted() {
        let payload = build_log_payload(Some(json!({"token": "session-abc", "email": "a@b.co"})), None).expect("payload");
        assert!(!payload.contains("session-abc"));
        assert!(payload.contains("a@b.co"));
    }

    #[test]
    fn empty_payload_is_none() {
        assert!(build_log_payload(None, None).is_none());
    }

    #[test]
    fn oversized_payload_is_truncated() {
        let large = "é".repeat(MAX_LOG_PAYLOAD_BYTES);
        let payload = build_log_payload(None, Some(json!({"text": large}))).expect("payload");
        assert!(payload.ends_with("...<truncated>"));
        assert!(payload.len() <= MAX_LOG_PAYLOAD_BYTES + "...<truncated>".len());
    }
}
