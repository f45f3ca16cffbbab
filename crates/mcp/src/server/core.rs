use std::sync::Arc;

use payline_types::{ContentEnvelope, ContentItem};
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ErrorData as McpError, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{ServerHandler, service::RequestContext};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::server::log_payload::build_log_payload;
use crate::tools::{ToolContext, ToolRegistry};

const INSTRUCTIONS: &str = "Payline payment platform tools.\n\
IDENTIFIERS:\n\
- Path identifiers (customerId, paymentId, transactionId, ...) are 36 to 64 characters.\n\
- account_id defaults to the configured account code when omitted.\n\
IDEMPOTENCY:\n\
- Create, refund, cancel and capture tools accept idempotency_key; one is generated when omitted.\n\
- Reuse the same key when retrying a request that may have reached the API.\n\
ROUTING:\n\
- Call routingLogin first; pass its token to every other routing tool.\n\
DOCUMENTATION:\n\
- documentationRead returns reference pages by keyword.";

/// MCP handler that publishes the tool registry and dispatches calls into it.
#[derive(Clone)]
pub struct PaylineMcpCore {
    registry: Arc<ToolRegistry>,
    context: ToolContext,
}

impl PaylineMcpCore {
    pub fn new(registry: Arc<ToolRegistry>, context: ToolContext) -> Self {
        Self { registry, context }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    /// Dispatch one call and convert the outcome to the protocol result.
    ///
    /// Unknown tools and invalid input are protocol errors. Every other
    /// failure is a well-formed error result with a single text item.
    pub async fn call(&self, name: &str, arguments: Option<JsonObject>) -> Result<CallToolResult, McpError> {
        let request_log = arguments.clone().map(Value::Object);
        match self.registry.dispatch(&self.context, name, arguments).await {
            Ok(envelope) => {
                self.emit_log(name, request_log, Some(envelope_log_value(&envelope)));
                Ok(envelope_to_result(envelope))
            }
            Err(error) => match error.envelope() {
                Some(envelope) => {
                    warn!(tool = name, error = %error, "tool call failed");
                    self.emit_log(name, request_log, Some(envelope_log_value(&envelope)));
                    Ok(envelope_to_result(envelope))
                }
                None => {
                    info!(tool = name, error = %error, "tool call rejected");
                    let violations = error.violations_json();
                    let data = (!violations.is_empty()).then(|| json!({ "violations": violations }));
                    Err(McpError::invalid_params(error.to_string(), data))
                }
            },
        }
    }

    fn emit_log(&self, tool_name: &str, request: Option<Value>, response: Option<Value>) {
        if let Some(payload) = build_log_payload(request, response) {
            debug!(tool = tool_name, %payload, "tool call completed");
        }
    }
}

fn envelope_log_value(envelope: &ContentEnvelope) -> Value {
    serde_json::to_value(envelope).unwrap_or(Value::Null)
}

/// Convert a handler envelope to the rmcp result type.
///
/// Object items are sent as JSON text content; the first object item is also
/// the structured content.
pub fn envelope_to_result(envelope: ContentEnvelope) -> CallToolResult {
    let mut structured = None;
    let mut content = Vec::with_capacity(envelope.content.len());
    for item in envelope.content {
        match item {
            ContentItem::Text { text } => content.push(Content::text(text)),
            ContentItem::Object { object } => {
                content.push(Content::text(object.to_string()));
                if structured.is_none() && object.is_object() {
                    structured = Some(object);
                }
            }
        }
    }

    if envelope.is_error {
        return CallToolResult::error(content);
    }
    let mut result = CallToolResult::success(content);
    result.structured_content = structured;
    result
}

impl ServerHandler for PaylineMcpCore {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(self.registry.to_rmcp_tools())))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move { self.call(&request.name, request.arguments).await }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: "payline".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Payline MCP".to_string()),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payline_types::OutputFormat;

    fn core() -> PaylineMcpCore {
        PaylineMcpCore::new(
            Arc::new(ToolRegistry::default()),
            ToolContext::new(None, OutputFormat::Text, "https://docs.payline.dev"),
        )
    }

    #[test]
    fn object_items_become_structured_content() {
        let envelope = ContentEnvelope::single(json!({"id": "pay_1"}), OutputFormat::Object);
        let result = envelope_to_result(envelope);
        assert_eq!(result.structured_content, Some(json!({"id": "pay_1"})));
        assert_eq!(result.is_error, Some(false));
    }

    #[test]
    fn error_envelopes_set_is_error() {
        let result = envelope_to_result(ContentEnvelope::error_text("boom"));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);
    }

    #[tokio::test]
    async fn unknown_tool_is_invalid_params() {
        let error = core().call("doesNotExist", None).await.expect_err("unknown tool");
        assert!(error.message.contains("doesNotExist"));
        assert!(error.data.is_none());
    }

    #[tokio::test]
    async fn validation_failure_carries_violations() {
        let error = core().call("paymentRetrieve", None).await.expect_err("missing paymentId");
        let data = error.data.expect("violations data");
        assert_eq!(data["violations"][0]["path"], "$.paymentId");
    }

    #[test]
    fn server_info_enables_tools() {
        let info = core().get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "payline");
    }
}
