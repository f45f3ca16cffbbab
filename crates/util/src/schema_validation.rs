//! JSON Schema validation for tool input.
//!
//! The interpreter covers the keyword subset emitted by `schemars` for the
//! request shapes in `payline-types`: `type`, `enum`, `const`, object and
//! array keywords, string and numeric bounds, `pattern`, a handful of
//! `format` values, local `$ref` resolution and the `anyOf`/`oneOf`/`allOf`
//! combinators. Unknown keywords are ignored.
//!
//! Validation never stops at the first failure: every violated constraint is
//! reported with the JSON path of the offending value so callers can surface
//! all problems in one round trip.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::warn;

const MAX_DEPTH: usize = 64;

static UUID_FORMAT: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$").ok());
static EMAIL_FORMAT: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());
/// Compiled `pattern` keywords; `None` marks a pattern that failed to compile.
static PATTERN_CACHE: Lazy<Mutex<HashMap<String, Option<Regex>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// A single violated schema constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON path of the offending value (`$`, `$.amount.currency`, `$.items[2]`).
    pub path: String,
    /// Keyword that failed, e.g. `required`, `minLength`, `enum`.
    pub rule: String,
    /// Human-readable validation error message.
    pub message: String,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Converts this violation into a JSON object for transport layers.
    pub fn to_json_value(&self) -> Value {
        serde_json::json!({
            "path": self.path,
            "rule": self.rule,
            "message": self.message,
        })
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Collects every violation of `schema` by `instance`.
pub fn collect_schema_violations(schema: &Value, instance: &Value) -> Vec<SchemaViolation> {
    let validator = Validator { root: schema };
    let mut violations = Vec::new();
    validator.check(schema, instance, "$", 0, &mut violations);
    violations
}

/// Returns `Ok(())` when `instance` satisfies `schema`, otherwise returns all violations.
pub fn validate_against_schema(schema: &Value, instance: &Value) -> Result<(), Vec<SchemaViolation>> {
    let violations = collect_schema_violations(schema, instance);
    if violations.is_empty() {
        return Ok(());
    }
    Err(violations)
}

struct Validator<'a> {
    root: &'a Value,
}

impl<'a> Validator<'a> {
    fn check(&self, schema: &'a Value, instance: &Value, path: &str, depth: usize, out: &mut Vec<SchemaViolation>) {
        if depth > MAX_DEPTH {
            out.push(SchemaViolation::new(path, "depth", "schema nesting is too deep to evaluate"));
            return;
        }

        let keywords = match schema {
            Value::Bool(true) => return,
            Value::Bool(false) => {
                out.push(SchemaViolation::new(path, "false", "no value is allowed here"));
                return;
            }
            Value::Object(keywords) => keywords,
            _ => return,
        };

        if let Some(reference) = keywords.get("$ref").and_then(Value::as_str) {
            match self.resolve(reference) {
                Some(target) => self.check(target, instance, path, depth + 1, out),
                None => out.push(SchemaViolation::new(path, "$ref", format!("unresolvable schema reference '{}'", reference))),
            }
        }

        if let Some(expected) = keywords.get("type")
            && !type_matches(expected, instance)
        {
            out.push(SchemaViolation::new(
                path,
                "type",
                format!("expected {}, found {}", describe_type(expected), json_type_name(instance)),
            ));
            return;
        }

        if let Some(Value::Array(allowed)) = keywords.get("enum")
            && !allowed.iter().any(|candidate| candidate == instance)
        {
            out.push(SchemaViolation::new(
                path,
                "enum",
                format!("value must be one of {}", Value::Array(allowed.clone())),
            ));
        }

        if let Some(expected) = keywords.get("const")
            && expected != instance
        {
            out.push(SchemaViolation::new(path, "const", format!("value must be {}", expected)));
        }

        match instance {
            Value::String(text) => self.check_string(keywords, text, path, out),
            Value::Number(_) => check_number(keywords, instance, path, out),
            Value::Object(map) => self.check_object(keywords, map, path, depth, out),
            Value::Array(items) => self.check_array(keywords, items, path, depth, out),
            _ => {}
        }

        self.check_combinators(keywords, instance, path, depth, out);
    }

    fn resolve(&self, reference: &str) -> Option<&'a Value> {
        let pointer = reference.strip_prefix('#')?;
        if pointer.is_empty() {
            return Some(self.root);
        }
        self.root.pointer(pointer)
    }

    fn check_string(&self, keywords: &Map<String, Value>, text: &str, path: &str, out: &mut Vec<SchemaViolation>) {
        let length = text.chars().count() as u64;
        if let Some(min) = keywords.get("minLength").and_then(Value::as_u64)
            && length < min
        {
            out.push(SchemaViolation::new(
                path,
                "minLength",
                format!("string must be at least {} characters long (got {})", min, length),
            ));
        }
        if let Some(max) = keywords.get("maxLength").and_then(Value::as_u64)
            && length > max
        {
            out.push(SchemaViolation::new(
                path,
                "maxLength",
                format!("string must be at most {} characters long (got {})", max, length),
            ));
        }

        if let Some(pattern) = keywords.get("pattern").and_then(Value::as_str) {
            if let Some(re) = compiled_pattern(pattern)
                && !re.is_match(text)
            {
                out.push(SchemaViolation::new(path, "pattern", format!("string does not match pattern '{}'", pattern)));
            }
        }

        if let Some(format) = keywords.get("format").and_then(Value::as_str)
            && !format_matches(format, text)
        {
            out.push(SchemaViolation::new(path, "format", format!("string is not a valid {}", format)));
        }
    }

    fn check_object(&self, keywords: &'a Map<String, Value>, map: &Map<String, Value>, path: &str, depth: usize, out: &mut Vec<SchemaViolation>) {
        if let Some(Value::Array(required)) = keywords.get("required") {
            for field in required.iter().filter_map(Value::as_str) {
                if !map.contains_key(field) {
                    out.push(SchemaViolation::new(
                        child_path(path, field),
                        "required",
                        format!("missing required field `{}`", field),
                    ));
                }
            }
        }

        let properties = keywords.get("properties").and_then(Value::as_object);
        for (key, value) in map {
            let child = child_path(path, key);
            if let Some(property_schema) = properties.and_then(|props| props.get(key)) {
                self.check(property_schema, value, &child, depth + 1, out);
                continue;
            }
            match keywords.get("additionalProperties") {
                Some(Value::Bool(false)) => {
                    out.push(SchemaViolation::new(child, "additionalProperties", format!("unknown field `{}`", key)));
                }
                Some(extra @ Value::Object(_)) => self.check(extra, value, &child, depth + 1, out),
                _ => {}
            }
        }
    }

    fn check_array(&self, keywords: &'a Map<String, Value>, items: &[Value], path: &str, depth: usize, out: &mut Vec<SchemaViolation>) {
        let count = items.len() as u64;
        if let Some(min) = keywords.get("minItems").and_then(Value::as_u64)
            && count < min
        {
            out.push(SchemaViolation::new(path, "minItems", format!("array must contain at least {} items (got {})", min, count)));
        }
        if let Some(max) = keywords.get("maxItems").and_then(Value::as_u64)
            && count > max
        {
            out.push(SchemaViolation::new(path, "maxItems", format!("array must contain at most {} items (got {})", max, count)));
        }

        if let Some(item_schema) = keywords.get("items") {
            for (index, item) in items.iter().enumerate() {
                self.check(item_schema, item, &format!("{}[{}]", path, index), depth + 1, out);
            }
        }
    }

    fn check_combinators(&self, keywords: &'a Map<String, Value>, instance: &Value, path: &str, depth: usize, out: &mut Vec<SchemaViolation>) {
        if let Some(Value::Array(branches)) = keywords.get("allOf") {
            for branch in branches {
                self.check(branch, instance, path, depth + 1, out);
            }
        }

        if let Some(Value::Array(branches)) = keywords.get("anyOf") {
            let outcomes = self.evaluate_branches(branches, instance, path, depth);
            if !outcomes.iter().any(Vec::is_empty) {
                out.extend(closest_branch(outcomes, path));
            }
        }

        if let Some(Value::Array(branches)) = keywords.get("oneOf") {
            let outcomes = self.evaluate_branches(branches, instance, path, depth);
            match outcomes.iter().filter(|violations| violations.is_empty()).count() {
                1 => {}
                0 => out.extend(closest_branch(outcomes, path)),
                _ => out.push(SchemaViolation::new(path, "oneOf", "value matches more than one allowed alternative")),
            }
        }

        if let Some(negated) = keywords.get("not") {
            let mut scratch = Vec::new();
            self.check(negated, instance, path, depth + 1, &mut scratch);
            if scratch.is_empty() {
                out.push(SchemaViolation::new(path, "not", "value matches a disallowed schema"));
            }
        }
    }

    fn evaluate_branches(&self, branches: &'a [Value], instance: &Value, path: &str, depth: usize) -> Vec<Vec<SchemaViolation>> {
        branches
            .iter()
            .map(|branch| {
                let mut scratch = Vec::new();
                self.check(branch, instance, path, depth + 1, &mut scratch);
                scratch
            })
            .collect()
    }
}

/// Picks the violations of the branch that came closest to matching.
///
/// Branches that reject the value's type outright rank below branches that
/// accepted the type but failed a nested constraint. Ties go to the earliest branch.
fn closest_branch(outcomes: Vec<Vec<SchemaViolation>>, path: &str) -> Vec<SchemaViolation> {
    outcomes
        .into_iter()
        .min_by_key(|violations| {
            let type_mismatch = violations.iter().any(|v| v.path == path && v.rule == "type");
            (type_mismatch, violations.len())
        })
        .unwrap_or_default()
}

fn check_number(keywords: &Map<String, Value>, instance: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
    let Some(number) = instance.as_f64() else {
        return;
    };
    let bound = |name: &str| keywords.get(name).and_then(Value::as_f64);

    if let Some(min) = bound("minimum")
        && number < min
    {
        out.push(SchemaViolation::new(path, "minimum", format!("value must be >= {}", min)));
    }
    if let Some(max) = bound("maximum")
        && number > max
    {
        out.push(SchemaViolation::new(path, "maximum", format!("value must be <= {}", max)));
    }
    if let Some(min) = bound("exclusiveMinimum")
        && number <= min
    {
        out.push(SchemaViolation::new(path, "exclusiveMinimum", format!("value must be > {}", min)));
    }
    if let Some(max) = bound("exclusiveMaximum")
        && number >= max
    {
        out.push(SchemaViolation::new(path, "exclusiveMaximum", format!("value must be < {}", max)));
    }
}

fn type_matches(expected: &Value, instance: &Value) -> bool {
    match expected {
        Value::String(name) => instance_is(name, instance),
        Value::Array(names) => names.iter().filter_map(Value::as_str).any(|name| instance_is(name, instance)),
        _ => true,
    }
}

fn instance_is(type_name: &str, instance: &Value) -> bool {
    match type_name {
        "null" => instance.is_null(),
        "boolean" => instance.is_boolean(),
        "object" => instance.is_object(),
        "array" => instance.is_array(),
        "string" => instance.is_string(),
        "number" => instance.is_number(),
        "integer" => instance.is_i64() || instance.is_u64() || instance.as_f64().is_some_and(|n| n.fract() == 0.0),
        _ => true,
    }
}

fn describe_type(expected: &Value) -> String {
    match expected {
        Value::Array(names) => names.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(" or "),
        Value::String(name) => name.clone(),
        other => other.to_string(),
    }
}

/// Compile `pattern` once per process. Invalid patterns are logged on first sight and skipped.
fn compiled_pattern(pattern: &str) -> Option<Regex> {
    let mut cache = match PATTERN_CACHE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    cache
        .entry(pattern.to_string())
        .or_insert_with(|| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(error) => {
                warn!(%pattern, %error, "skipping invalid schema pattern");
                None
            }
        })
        .clone()
}

fn json_type_name(instance: &Value) -> &'static str {
    match instance {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn format_matches(format: &str, text: &str) -> bool {
    match format {
        "uuid" => UUID_FORMAT.as_ref().is_none_or(|re| re.is_match(text)),
        "email" => EMAIL_FORMAT.as_ref().is_none_or(|re| re.is_match(text)),
        "date" => NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok(),
        "date-time" => DateTime::parse_from_rfc3339(text).is_ok(),
        // uint32, double and friends describe numbers; anything else is advisory
        _ => true,
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        format!("{}.{}", parent, key)
    } else {
        format!("{}[{}]", parent, Value::String(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn customer_schema() -> Value {
        json!({
            "type": "object",
            "required": ["customerId"],
            "properties": {
                "customerId": { "type": "string", "minLength": 36, "maxLength": 64 },
                "email": { "type": ["string", "null"], "pattern": "^[^@\\s]+@[^@\\s]+\\.[^@\\s]+$" },
                "amount": { "anyOf": [{ "$ref": "#/$defs/Amount" }, { "type": "null" }] },
                "tags": { "type": "array", "items": { "type": "string" }, "maxItems": 2 }
            },
            "$defs": {
                "Amount": {
                    "type": "object",
                    "required": ["currency", "value"],
                    "properties": {
                        "currency": { "type": "string", "enum": ["USD", "BRL"] },
                        "value": { "type": "number", "minimum": 0 }
                    }
                }
            }
        })
    }

    fn rules(violations: &[SchemaViolation]) -> Vec<(&str, &str)> {
        violations.iter().map(|v| (v.path.as_str(), v.rule.as_str())).collect()
    }

    #[test]
    fn accepts_valid_instance() {
        let instance = json!({
            "customerId": "c".repeat(36),
            "email": null,
            "amount": { "currency": "USD", "value": 10.5 },
            "extra": { "forwarded": true }
        });
        assert!(validate_against_schema(&customer_schema(), &instance).is_ok());
    }

    #[test]
    fn reports_missing_required_field() {
        let violations = collect_schema_violations(&customer_schema(), &json!({}));
        assert_eq!(rules(&violations), vec![("$.customerId", "required")]);
    }

    #[test]
    fn length_bounds_count_characters() {
        let schema = customer_schema();
        assert_eq!(
            rules(&collect_schema_violations(&schema, &json!({"customerId": "c".repeat(35)}))),
            vec![("$.customerId", "minLength")]
        );
        assert_eq!(
            rules(&collect_schema_violations(&schema, &json!({"customerId": "c".repeat(65)}))),
            vec![("$.customerId", "maxLength")]
        );
        assert!(collect_schema_violations(&schema, &json!({"customerId": "é".repeat(64)})).is_empty());
    }

    #[test]
    fn reports_nested_violations_through_references() {
        let instance = json!({
            "customerId": "c".repeat(40),
            "amount": { "currency": "EUR", "value": -1 }
        });
        let violations = collect_schema_violations(&customer_schema(), &instance);
        assert_eq!(rules(&violations), vec![("$.amount.currency", "enum"), ("$.amount.value", "minimum")]);
    }

    #[test]
    fn collects_every_violation() {
        let instance = json!({
            "customerId": 42,
            "email": "not-an-email",
            "tags": ["a", "b", 3]
        });
        let violations = collect_schema_violations(&customer_schema(), &instance);
        assert_eq!(
            rules(&violations),
            vec![
                ("$.customerId", "type"),
                ("$.email", "pattern"),
                ("$.tags", "maxItems"),
                ("$.tags[2]", "type"),
            ]
        );
    }

    #[test]
    fn one_of_requires_exactly_one_match() {
        let schema = json!({ "oneOf": [{ "const": "DIRECT" }, { "const": "REDIRECT" }] });
        assert!(validate_against_schema(&schema, &json!("DIRECT")).is_ok());
        let violations = collect_schema_violations(&schema, &json!("OTHER"));
        assert_eq!(rules(&violations), vec![("$", "const")]);
    }

    #[test]
    fn additional_properties_false_rejects_unknown_fields() {
        let schema = json!({ "type": "object", "properties": { "a": true }, "additionalProperties": false });
        let violations = collect_schema_violations(&schema, &json!({ "a": 1, "b-c": 2 }));
        assert_eq!(rules(&violations), vec![("$[\"b-c\"]", "additionalProperties")]);
    }

    #[test]
    fn formats_are_checked() {
        let schema = json!({ "type": "string", "format": "uuid" });
        assert!(validate_against_schema(&schema, &json!("0b5c1f36-3a8e-4f41-9d7a-3f2c9f0e8b11")).is_ok());
        assert!(validate_against_schema(&schema, &json!("nope")).is_err());

        let date = json!({ "type": "string", "format": "date" });
        assert!(validate_against_schema(&date, &json!("2024-02-29")).is_ok());
        assert!(validate_against_schema(&date, &json!("2023-02-29")).is_err());
    }

    #[test]
    fn violations_serialize_for_transport() {
        let violation = SchemaViolation::new("$.paymentId", "required", "missing required field `paymentId`");
        assert_eq!(
            violation.to_json_value(),
            json!({"path": "$.paymentId", "rule": "required", "message": "missing required field `paymentId`"})
        );
    }

    #[test]
    fn patterns_compile_once_and_invalid_ones_are_skipped() {
        let schema = json!({"type": "string", "pattern": "^[A-Z]{2}$"});
        assert!(validate_against_schema(&schema, &json!("BR")).is_ok());
        assert!(validate_against_schema(&schema, &json!("br")).is_err());
        assert!(PATTERN_CACHE.lock().expect("cache").get("^[A-Z]{2}$").is_some_and(Option::is_some));

        let broken = json!({"type": "string", "pattern": "(unclosed"});
        assert!(validate_against_schema(&broken, &json!("anything")).is_ok());
        assert!(PATTERN_CACHE.lock().expect("cache").get("(unclosed").is_some_and(Option::is_none));
    }
}
