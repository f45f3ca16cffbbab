//! Generic invoke-and-envelope routine shared by every endpoint tool.

use payline_api::{ApiRequest, ApiResponse, PaymentApi};
use payline_types::{ContentEnvelope, ContentItem, OutputFormat};
use payline_util::build_path;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{DefaultRule, Endpoint, IDEMPOTENCY_FIELD, ToolDescriptor, ValidatedInput};
use crate::error::ToolError;

/// Run one endpoint tool: rewrite the input, call the API once, shape the response.
pub async fn invoke_endpoint(
    api: &dyn PaymentApi,
    descriptor: &ToolDescriptor,
    endpoint: &Endpoint,
    input: ValidatedInput,
    format: OutputFormat,
) -> Result<ContentEnvelope, ToolError> {
    let request = build_request(descriptor, endpoint, input, api.account_code())?;
    debug!(
        tool = descriptor.name,
        method = %request.method,
        path = %request.path,
        "calling payment API"
    );
    let response = api.execute(request).await?;
    Ok(shape_response(&response, format, descriptor.response_meta))
}

/// Turn validated input into the outbound request.
///
/// Path placeholders, query fields, the bearer field and the idempotency key
/// are each taken out of the input; what remains is the body.
pub fn build_request(descriptor: &ToolDescriptor, endpoint: &Endpoint, input: ValidatedInput, account_code: &str) -> Result<ApiRequest, ToolError> {
    let mut fields = input.into_inner();
    apply_defaults(&mut fields, &descriptor.defaults, account_code).map_err(|message| ToolError::Request {
        tool: descriptor.name.to_string(),
        message,
    })?;

    let idempotency_key = descriptor.idempotent.then(|| take_idempotency_key(&mut fields));

    let path = build_path(endpoint.path, &mut fields).map_err(|error| ToolError::Request {
        tool: descriptor.name.to_string(),
        message: error.to_string(),
    })?;

    let bearer_token = match endpoint.bearer {
        Some(field) => match fields.remove(field) {
            Some(Value::String(token)) => Some(token),
            Some(other) => Some(other.to_string()),
            None => None,
        },
        None => None,
    };

    let mut query = Vec::new();
    for name in endpoint.query {
        if let Some(value) = fields.remove(*name) {
            push_query(&mut query, name, value);
        }
    }

    let body = if endpoint.sends_body() {
        Some(Value::Object(fields))
    } else {
        for (name, value) in fields {
            push_query(&mut query, &name, value);
        }
        None
    };

    Ok(ApiRequest {
        method: endpoint.method.clone(),
        path,
        query,
        body,
        idempotency_key,
        bearer_token,
    })
}

/// Render the response body, plus status and headers when the tool reports them.
pub fn shape_response(response: &ApiResponse, format: OutputFormat, response_meta: bool) -> ContentEnvelope {
    let mut envelope = ContentEnvelope::single(response.body.clone(), format);
    if response_meta {
        envelope.push(ContentItem::render(response.meta(), format));
    }
    envelope
}

fn apply_defaults(fields: &mut Map<String, Value>, rules: &[DefaultRule], account_code: &str) -> Result<(), String> {
    for rule in rules {
        match rule {
            DefaultRule::Account { field } => {
                let missing = fields.get(*field).is_none_or(Value::is_null);
                if missing && !account_code.is_empty() {
                    fields.insert((*field).to_string(), Value::String(account_code.to_string()));
                }
            }
            DefaultRule::Force { pointer, value } => force_pointer(fields, pointer, value.clone())?,
        }
    }
    Ok(())
}

/// Set `pointer` to `value`, creating intermediate objects.
///
/// Fails when a value along the pointer is neither an object nor null.
fn force_pointer(fields: &mut Map<String, Value>, pointer: &str, value: Value) -> Result<(), String> {
    let segments: Vec<&str> = pointer.trim_start_matches('/').split('/').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut current = fields;
    for segment in parents {
        let entry = current.entry((*segment).to_string()).or_insert_with(|| Value::Object(Map::new()));
        if entry.is_null() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(next) = entry else {
            warn!(pointer, segment, "cannot force default through a non-object value");
            return Err(format!("cannot set {pointer}: `{segment}` must be an object"));
        };
        current = next;
    }
    current.insert((*last).to_string(), value);
    Ok(())
}

fn take_idempotency_key(fields: &mut Map<String, Value>) -> String {
    match fields.remove(IDEMPOTENCY_FIELD) {
        Some(Value::String(key)) if !key.trim().is_empty() => key,
        _ => Uuid::new_v4().to_string(),
    }
}

fn push_query(query: &mut Vec<(String, String)>, name: &str, value: Value) {
    match value {
        Value::Null => {}
        Value::String(s) => query.push((name.to_string(), s)),
        other => query.push((name.to_string(), other.to_string())),
    }
}
