use std::path::PathBuf;

use dirs_next::home_dir;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Map, Value};
use thiserror::Error;

/// Everything except RFC3986 unreserved bytes (`A-Z a-z 0-9 - . _ ~`).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathTemplateError {
    #[error("missing path parameter `{name}` for {template}")]
    MissingParameter { name: String, template: String },
    #[error("unterminated placeholder in path template {template}")]
    Unterminated { template: String },
}

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if p == "~" {
        return home();
    }
    if let Some(rest) = p.strip_prefix("~/").or_else(|| p.strip_prefix("~\\")) {
        return home().join(rest);
    }
    PathBuf::from(p)
}

/// Fills `{name}` placeholders in `template`, removing each consumed value from `variables`.
///
/// Values are percent-encoded as a single path segment. Non-string values use
/// their JSON rendering.
pub fn build_path(template: &str, variables: &mut Map<String, Value>) -> Result<String, PathTemplateError> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        path.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            return Err(PathTemplateError::Unterminated {
                template: template.to_string(),
            });
        };
        let name = &after[..close];
        let value = variables.remove(name).ok_or_else(|| PathTemplateError::MissingParameter {
            name: name.to_string(),
            template: template.to_string(),
        })?;
        let raw = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };
        path.extend(utf8_percent_encode(&raw, PATH_SEGMENT));
        rest = &after[close + 1..];
    }
    path.push_str(rest);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn build_path_consumes_placeholders() {
        let mut variables = vars(json!({"paymentId": "pay-1", "transactionId": "txn_2", "amount": 10}));
        let path = build_path("/v1/payments/{paymentId}/transactions/{transactionId}/refund", &mut variables).expect("path");
        assert_eq!(path, "/v1/payments/pay-1/transactions/txn_2/refund");
        assert_eq!(variables, vars(json!({"amount": 10})));
    }

    #[test]
    fn build_path_encodes_reserved_bytes() {
        let mut variables = vars(json!({"customerId": "team/app name"}));
        let path = build_path("/v1/customers/{customerId}", &mut variables).expect("path");
        assert_eq!(path, "/v1/customers/team%2Fapp%20name");
    }

    #[test]
    fn build_path_reports_missing_parameters() {
        let mut variables = Map::new();
        let error = build_path("/v1/recipients/{recipientId}", &mut variables).expect_err("missing");
        assert!(matches!(error, PathTemplateError::MissingParameter { ref name, .. } if name == "recipientId"));
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde(" /etc/payline/config.json "), PathBuf::from("/etc/payline/config.json"));
    }
}
