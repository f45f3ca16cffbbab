//! Content envelope returned by every tool handler.

use std::{error::Error, fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shape a tool result is rendered in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON text.
    #[default]
    Text,
    /// The parsed upstream value, passed through untouched.
    Object,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ParseOutputFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "object" => Ok(Self::Object),
            _ => Err(ParseOutputFormatError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutputFormatError(String);

impl fmt::Display for ParseOutputFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid output format '{}'; expected 'text' or 'object'", self.0)
    }
}

impl Error for ParseOutputFormatError {}

/// One entry in a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Text { text: String },
    Object { object: Value },
}

impl ContentItem {
    /// Render a value in the requested format.
    ///
    /// Text rendering falls back to compact JSON if pretty printing fails, which
    /// can only happen for values that are not representable as JSON text.
    pub fn render(value: Value, format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => {
                let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
                Self::Text { text }
            }
            OutputFormat::Object => Self::Object { object: value },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Object { .. } => None,
        }
    }

    pub fn as_object(&self) -> Option<&Value> {
        match self {
            Self::Object { object } => Some(object),
            Self::Text { .. } => None,
        }
    }
}

/// Uniform `{ content: [...] }` wrapper every handler returns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentEnvelope {
    pub content: Vec<ContentItem>,
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ContentEnvelope {
    pub fn new(content: Vec<ContentItem>) -> Self {
        Self { content, is_error: false }
    }

    /// A single-item envelope holding `value` in the requested format.
    pub fn single(value: Value, format: OutputFormat) -> Self {
        Self::new(vec![ContentItem::render(value, format)])
    }

    /// A failed invocation described by one text item.
    pub fn error_text(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::Text { text: message.into() }],
            is_error: true,
        }
    }

    pub fn push(&mut self, item: ContentItem) {
        self.content.push(item);
    }

    pub fn first(&self) -> Option<&ContentItem> {
        self.content.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_items_serialize_with_type_tag() {
        let envelope = ContentEnvelope::single(json!({"id": "cus_1"}), OutputFormat::Text);
        let serialized = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(serialized["content"][0]["type"], "text");
        assert!(serialized.get("isError").is_none());
        let text = serialized["content"][0]["text"].as_str().expect("text");
        assert!(text.contains("\n"), "expected pretty printed text: {text}");
    }

    #[test]
    fn object_items_keep_the_raw_value() {
        let raw = json!({"id": "pay_1", "amount": {"value": 10.5, "currency": "USD"}});
        let envelope = ContentEnvelope::single(raw.clone(), OutputFormat::Object);
        assert_eq!(envelope.first().and_then(ContentItem::as_object), Some(&raw));
        let serialized = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(serialized["content"][0], json!({"type": "object", "object": raw}));
    }

    #[test]
    fn error_envelope_is_flagged() {
        let envelope = ContentEnvelope::error_text("boom");
        let serialized = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(serialized["isError"], true);
        assert_eq!(envelope.first().and_then(ContentItem::as_text), Some("boom"));
    }

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("Object".parse::<OutputFormat>(), Ok(OutputFormat::Object));
        assert_eq!(" text ".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
