//! Tool registry for the payment API.
//!
//! Every tool is a [`ToolDescriptor`]: a name, a JSON schema generated from a
//! request type in `payline-types`, and a declarative [`ToolAction`] saying
//! which endpoint it calls and which input rewrites apply first. One generic
//! routine ([`invoke::invoke_endpoint`]) runs every endpoint tool.

mod catalog;
pub mod documentation;
pub mod invoke;
pub mod validation;

use std::sync::Arc;

use payline_api::PaymentApi;
use payline_types::{ContentEnvelope, OutputFormat};
use reqwest::Method;
use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ToolError;
pub use catalog::payline_tools;
pub use validation::ValidatedInput;

/// Canonical input field carrying a caller-supplied idempotency key.
pub const IDEMPOTENCY_FIELD: &str = "idempotency_key";
/// Canonical input field carrying the account a request is scoped to.
pub const ACCOUNT_FIELD: &str = "account_id";

/// Input rewrite applied before the request is built.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultRule {
    /// Copy the configured account code into `field` when the caller omitted it.
    Account { field: &'static str },
    /// Always set the JSON-pointer location to `value`, creating parent objects as needed.
    Force { pointer: &'static str, value: Value },
}

/// HTTP endpoint template for a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    /// Path with `{field}` placeholders filled from input.
    pub path: &'static str,
    /// Input fields sent as query parameters.
    pub query: &'static [&'static str],
    /// Input field sent as `Authorization: Bearer ...`.
    pub bearer: Option<&'static str>,
}

impl Endpoint {
    pub fn sends_body(&self) -> bool {
        [Method::POST, Method::PUT, Method::PATCH].contains(&self.method)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolAction {
    Endpoint(Endpoint),
    /// Fetch a static documentation page.
    Documentation,
}

/// Typed gate a validated input must also deserialize through.
pub type InputGate = fn(&Value) -> Result<(), serde_json::Error>;

fn typed_gate<T: DeserializeOwned>(value: &Value) -> Result<(), serde_json::Error> {
    T::deserialize(value).map(|_| ())
}

/// Declarative description of one tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: Arc<JsonObject>,
    pub action: ToolAction,
    pub defaults: Vec<DefaultRule>,
    /// Whether the tool sends an idempotency key (caller-supplied or generated).
    pub idempotent: bool,
    /// Whether a second content item with status and headers is appended.
    pub response_meta: bool,
    pub read_only: bool,
    pub destructive: bool,
    gate: InputGate,
}

impl ToolDescriptor {
    /// Start a descriptor whose schema and typed gate come from `T`.
    pub fn for_input<T: JsonSchema + DeserializeOwned>(name: &'static str, title: &'static str, description: &'static str) -> Self {
        Self {
            name,
            title,
            description,
            input_schema: Arc::new(schema_object::<T>()),
            action: ToolAction::Documentation,
            defaults: Vec::new(),
            idempotent: false,
            response_meta: false,
            read_only: true,
            destructive: false,
            gate: typed_gate::<T>,
        }
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        match &self.action {
            ToolAction::Endpoint(endpoint) => Some(endpoint),
            ToolAction::Documentation => None,
        }
    }

    pub(crate) fn gate(&self) -> InputGate {
        self.gate
    }

    /// Convert to the rmcp model published through `tools/list`.
    pub fn to_rmcp_tool(&self) -> Tool {
        let mut tool = Tool::new(self.name, self.description, Arc::clone(&self.input_schema));
        tool.title = Some(self.title.to_string());
        let mut annotations = ToolAnnotations::with_title(self.title);
        annotations.read_only_hint = Some(self.read_only);
        annotations.destructive_hint = Some(self.destructive);
        annotations.idempotent_hint = Some(self.read_only || self.idempotent);
        annotations.open_world_hint = Some(true);
        tool.annotations = Some(annotations);
        tool
    }

    /// Catalog entry printed by `payline tools`.
    pub fn summary(&self) -> Value {
        let (method, path) = match &self.action {
            ToolAction::Endpoint(endpoint) => (Some(endpoint.method.as_str()), Some(endpoint.path)),
            ToolAction::Documentation => (None, None),
        };
        serde_json::json!({
            "name": self.name,
            "title": self.title,
            "description": self.description,
            "method": method,
            "path": path,
            "idempotent": self.idempotent,
            "readOnly": self.read_only,
            "destructive": self.destructive,
            "inputSchema": Value::Object((*self.input_schema).clone()),
        })
    }
}

fn schema_object<T: JsonSchema>() -> JsonObject {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(object)) => object,
        _ => {
            let mut fallback = Map::new();
            fallback.insert("type".into(), Value::String("object".into()));
            fallback
        }
    }
}

/// Per-call context handed to every tool.
#[derive(Clone)]
pub struct ToolContext {
    /// `None` until credentials are configured.
    pub api: Option<Arc<dyn PaymentApi>>,
    pub output_format: OutputFormat,
    pub docs_base_url: String,
}

impl ToolContext {
    pub fn new(api: Option<Arc<dyn PaymentApi>>, output_format: OutputFormat, docs_base_url: impl Into<String>) -> Self {
        Self {
            api,
            output_format,
            docs_base_url: docs_base_url.into(),
        }
    }
}

/// Ordered collection of tool descriptors.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new(payline_tools())
    }
}

impl ToolRegistry {
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self { tools }
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// First descriptor registered under `name`.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn to_rmcp_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDescriptor::to_rmcp_tool).collect()
    }

    /// Validate `arguments` for tool `name` and run it.
    ///
    /// Validation happens before the client check, so malformed input is
    /// reported even when no credentials are configured.
    pub async fn dispatch(&self, context: &ToolContext, name: &str, arguments: Option<Map<String, Value>>) -> Result<ContentEnvelope, ToolError> {
        let descriptor = self.get(name).ok_or_else(|| ToolError::UnknownTool { name: name.to_string() })?;
        let input = validation::validate(descriptor, arguments.unwrap_or_default())?;
        let api = context.api.as_deref().ok_or(ToolError::NotInitialized)?;
        debug!(tool = descriptor.name, "dispatching tool call");

        match &descriptor.action {
            ToolAction::Endpoint(endpoint) => invoke::invoke_endpoint(api, descriptor, endpoint, input, context.output_format).await,
            ToolAction::Documentation => documentation::read_documentation(api, &context.docs_base_url, input).await,
        }
    }
}
