//! # HTTP Utilities
//!
//! Helpers for turning payment API responses into values and error messages.

use serde_json::Value;

/// Return a user-friendly error message for common HTTP status codes.
///
/// # Example
/// ```rust
/// use payline_util::http::status_error_message;
///
/// let error_401 = status_error_message(401).unwrap();
/// assert!(error_401.contains("PAYLINE_PRIVATE_SECRET_KEY"));
///
/// assert!(status_error_message(404).is_none());
/// ```
pub fn status_error_message(status_code: u16) -> Option<String> {
    match status_code {
        401 => Some(
            "Unauthorized (401). Hint: check PAYLINE_PUBLIC_API_KEY and PAYLINE_PRIVATE_SECRET_KEY, and that the keys match the API environment".into(),
        ),
        403 => Some("Forbidden (403). Hint: check that the account code belongs to these API keys".into()),
        429 => Some("Too Many Requests (429). The payment API is rate limiting this account".into()),
        _ => None,
    }
}

/// Extract the most specific error message from an upstream error body.
///
/// Looks at `message`, then `messages[]`, then `detail`, then `code`.
///
/// # Example
/// ```rust
/// use payline_util::http::upstream_error_message;
/// use serde_json::json;
///
/// let body = json!({"code": "INVALID_REQUEST", "messages": ["amount is required", "country is invalid"]});
/// assert_eq!(upstream_error_message(&body).as_deref(), Some("amount is required; country is invalid"));
/// ```
pub fn upstream_error_message(body: &Value) -> Option<String> {
    let non_empty = |value: Option<&Value>| value.and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

    if let Some(message) = non_empty(body.get("message")) {
        return Some(message);
    }
    if let Some(Value::Array(messages)) = body.get("messages") {
        let joined = messages
            .iter()
            .filter_map(|m| non_empty(Some(m)))
            .collect::<Vec<_>>()
            .join("; ");
        if !joined.is_empty() {
            return Some(joined);
        }
    }
    non_empty(body.get("detail")).or_else(|| non_empty(body.get("code")))
}

/// Parse response text as JSON.
///
/// An empty (or whitespace-only) body parses as `null`.
///
/// # Example
/// ```rust
/// use payline_util::http::parse_response_json;
///
/// assert_eq!(parse_response_json("  ").unwrap(), serde_json::Value::Null);
/// assert!(parse_response_json(r#"{"id": "pay_1"}"#).is_ok());
/// assert!(parse_response_json("<html>").is_err());
/// ```
pub fn parse_response_json(text: &str) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str::<Value>(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_message_prefers_message_field() {
        let body = json!({"message": "Payment not found", "code": "NOT_FOUND"});
        assert_eq!(upstream_error_message(&body).as_deref(), Some("Payment not found"));
    }

    #[test]
    fn upstream_message_falls_back_to_detail_then_code() {
        assert_eq!(upstream_error_message(&json!({"detail": "bad"})).as_deref(), Some("bad"));
        assert_eq!(upstream_error_message(&json!({"code": "E42", "message": ""})).as_deref(), Some("E42"));
        assert_eq!(upstream_error_message(&json!({"unrelated": 1})), None);
        assert_eq!(upstream_error_message(&json!("plain string")), None);
    }
}
