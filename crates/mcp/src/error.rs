use payline_api::ApiError;
use payline_types::ContentEnvelope;
use payline_util::SchemaViolation;
use serde_json::Value;
use thiserror::Error;

pub const NOT_INITIALIZED_MESSAGE: &str = "payment API client is not initialized; set PAYLINE_ACCOUNT_CODE, PAYLINE_PUBLIC_API_KEY and \
     PAYLINE_PRIVATE_SECRET_KEY (or the config file equivalents) and restart the server";

/// Failure of a single tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool '{name}'")]
    UnknownTool { name: String },

    #[error("invalid input for {tool}: {}", summarize(violations))]
    Validation { tool: String, violations: Vec<SchemaViolation> },

    #[error("{}", NOT_INITIALIZED_MESSAGE)]
    NotInitialized,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("cannot build request for {tool}: {message}")]
    Request { tool: String, message: String },
}

impl ToolError {
    /// Error envelope for failures that happen after the input was accepted.
    ///
    /// Returns `None` for caller errors (unknown tool, invalid input), which
    /// the protocol layer reports as invalid parameters instead.
    pub fn envelope(&self) -> Option<ContentEnvelope> {
        match self {
            Self::UnknownTool { .. } | Self::Validation { .. } => None,
            Self::NotInitialized | Self::Api(_) | Self::Request { .. } => Some(ContentEnvelope::error_text(self.to_string())),
        }
    }

    /// Violations as JSON, empty unless this is a validation error.
    pub fn violations_json(&self) -> Vec<Value> {
        match self {
            Self::Validation { violations, .. } => violations.iter().map(SchemaViolation::to_json_value).collect(),
            _ => Vec::new(),
        }
    }
}

fn summarize(violations: &[SchemaViolation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use payline_types::ContentItem;

    #[test]
    fn caller_errors_have_no_envelope() {
        let error = ToolError::UnknownTool { name: "nope".into() };
        assert!(error.envelope().is_none());
    }

    #[test]
    fn api_errors_become_single_text_items() {
        let error = ToolError::from(ApiError::Transport("connection refused".into()));
        let envelope = error.envelope().expect("envelope");
        assert!(envelope.is_error);
        assert_eq!(envelope.content.len(), 1);
        let Some(ContentItem::Text { text }) = envelope.first() else {
            panic!("expected text item");
        };
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn validation_message_lists_every_violation() {
        let error = ToolError::Validation {
            tool: "paymentRetrieve".into(),
            violations: vec![
                SchemaViolation::new("$.paymentId", "required", "missing required property"),
                SchemaViolation::new("$.extra", "type", "expected string"),
            ],
        };
        let message = error.to_string();
        assert!(message.starts_with("invalid input for paymentRetrieve"));
        assert!(message.contains("$.paymentId"));
        assert!(message.contains("$.extra"));
        assert_eq!(error.violations_json().len(), 2);
    }
}
