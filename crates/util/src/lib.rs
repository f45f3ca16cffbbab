pub mod http;
pub mod keystore;
pub mod path_processing;
pub mod schema_validation;

pub use http::{parse_response_json, status_error_message, upstream_error_message};
pub use keystore::interpolation::{InterpolationError, interpolate_string, resolve_secret};
pub use path_processing::{PathTemplateError, build_path, expand_tilde};
pub use schema_validation::{SchemaViolation, collect_schema_violations, validate_against_schema};

use once_cell::sync::Lazy;
use regex::Regex;

static REDACTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(authorization:\s*(?:bearer\s+)?)([\w\-\.=:/+]+)",
        r"(?i)((?:public-api-key|private-secret-key)\s*:\s*)([^\s,]+)",
        r"(?i)([A-Z0-9_]*?(?:KEY|TOKEN|SECRET|PASSWORD)=)([^\s]+)",
        r#"(?i)("[\w\-]*(?:secret|token|password|api_key|api-key)"\s*:\s*")([^"]*)"#,
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Redacts values that look like secrets in a string.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for re in REDACTION_PATTERNS.iter() {
        redacted = re
            .replace_all(&redacted, |caps: &regex::Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{}<redacted>", prefix)
            })
            .to_string();
    }
    redacted
}
