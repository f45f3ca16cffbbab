//! Input validation gate for tool calls.

use payline_util::{SchemaViolation, validate_against_schema};
use serde_json::{Map, Value};

use super::ToolDescriptor;
use crate::error::ToolError;

/// Tool input that passed both the schema and the typed gate.
///
/// Only [`validate`] constructs one, so holding a `ValidatedInput` means no
/// network call can see unchecked caller input.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput(Map<String, Value>);

impl ValidatedInput {
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

#[cfg(test)]
impl ValidatedInput {
    /// Wrap fields without checking them, for request-building tests.
    pub(crate) fn unchecked(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Check `arguments` against the descriptor's schema, then deserialize them through its request type.
pub fn validate(descriptor: &ToolDescriptor, arguments: Map<String, Value>) -> Result<ValidatedInput, ToolError> {
    let schema = Value::Object((*descriptor.input_schema).clone());
    let instance = Value::Object(arguments);

    validate_against_schema(&schema, &instance).map_err(|violations| ToolError::Validation {
        tool: descriptor.name.to_string(),
        violations,
    })?;

    (descriptor.gate())(&instance).map_err(|error| ToolError::Validation {
        tool: descriptor.name.to_string(),
        violations: vec![SchemaViolation::new("$", "type", error.to_string())],
    })?;

    match instance {
        Value::Object(map) => Ok(ValidatedInput(map)),
        _ => Ok(ValidatedInput(Map::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolRegistry;
    use serde_json::json;

    fn arguments(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn accepts_input_matching_schema_and_type() {
        let registry = ToolRegistry::default();
        let descriptor = registry.get("customerCreate").expect("customerCreate");
        let input = validate(descriptor, arguments(json!({"merchant_customer_id": "abc", "email": "test@example.com"}))).expect("valid");
        assert_eq!(input.as_map().len(), 2);
    }

    #[test]
    fn schema_violations_are_all_reported() {
        let registry = ToolRegistry::default();
        let descriptor = registry.get("paymentRefund").expect("paymentRefund");
        let error = validate(descriptor, arguments(json!({"paymentId": "short"}))).expect_err("invalid");
        let ToolError::Validation { violations, .. } = error else {
            panic!("expected validation error");
        };
        let rules: Vec<_> = violations.iter().map(|v| (v.path.as_str(), v.rule.as_str())).collect();
        assert!(rules.contains(&("$.paymentId", "minLength")));
        assert!(rules.contains(&("$.transactionId", "required")));
        assert!(!rules.iter().any(|(path, _)| *path == "$.reason"));
    }

    #[test]
    fn refund_without_reason_is_accepted() {
        let registry = ToolRegistry::default();
        let descriptor = registry.get("paymentRefund").expect("paymentRefund");
        let input = validate(descriptor, arguments(json!({"paymentId": "p".repeat(36), "transactionId": "t".repeat(36)}))).expect("valid");
        assert!(!input.as_map().contains_key("reason"));
    }

    #[test]
    fn unknown_fields_survive_validation() {
        let registry = ToolRegistry::default();
        let descriptor = registry.get("customerRetrieve").expect("customerRetrieve");
        let input = validate(descriptor, arguments(json!({"customerId": "c".repeat(36), "expand": "payments"}))).expect("valid");
        assert_eq!(input.as_map()["expand"], json!("payments"));
    }
}
