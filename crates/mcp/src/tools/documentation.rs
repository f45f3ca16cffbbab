use payline_api::PaymentApi;
use payline_types::{ContentEnvelope, ContentItem, DocumentationReadRequest};
use tracing::debug;

use super::ValidatedInput;
use crate::error::ToolError;

pub const DEFAULT_DOCS_BASE_URL: &str = "https://docs.payline.dev";

/// Fetch the page for the requested keyword. Always a single text item.
pub async fn read_documentation(api: &dyn PaymentApi, docs_base_url: &str, input: ValidatedInput) -> Result<ContentEnvelope, ToolError> {
    let request: DocumentationReadRequest =
        serde_json::from_value(serde_json::Value::Object(input.into_inner())).map_err(|error| ToolError::Request {
            tool: "documentationRead".into(),
            message: error.to_string(),
        })?;
    let url = page_url(docs_base_url, &request);
    debug!(%url, "fetching documentation page");
    let text = api.fetch_document(&url).await?;
    Ok(ContentEnvelope::new(vec![ContentItem::Text { text }]))
}

fn page_url(docs_base_url: &str, request: &DocumentationReadRequest) -> String {
    format!("{}{}", docs_base_url.trim_end_matches('/'), request.keyword.page_path())
}
