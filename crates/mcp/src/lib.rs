//! Model Context Protocol server for the Payline payment API.
//!
//! The crate publishes a validated tool registry over MCP (stdio or
//! streamable HTTP). Each tool validates its input, makes one API call
//! through [`payline_api::PaymentApi`] and returns a content envelope.

pub mod config;
pub mod error;
pub mod server;
pub mod tools;

use std::sync::Arc;

use anyhow::Result;
use payline_api::{PaylineClient, PaymentApi};
use payline_types::OutputFormat;
use tracing::{info, warn};

pub use config::{ConfigError, PaylineConfig};
pub use error::{NOT_INITIALIZED_MESSAGE, ToolError};
pub use server::{McpHttpServer, PaylineMcpCore, RunningMcpHttpServer, resolve_bind_address, serve_stdio};
pub use tools::{ToolContext, ToolDescriptor, ToolRegistry};

/// Build the API client from configured credentials.
///
/// Returns `Ok(None)` when credentials are missing so the server can still
/// start and report the uninitialized client from every tool.
pub fn build_client(config: &PaylineConfig) -> Result<Option<Arc<dyn PaymentApi>>> {
    let Some(credentials) = config.credentials() else {
        warn!("payment API credentials are not configured; tools will report an uninitialized client");
        return Ok(None);
    };
    let client = PaylineClient::new(credentials, config.api_base_url.as_deref())?;
    info!(base_url = %client.base_url, "payment API client initialized");
    Ok(Some(Arc::new(client)))
}

/// Build the tool context for `config`, with an optional output format override.
pub fn build_context(config: &PaylineConfig, output_format: Option<OutputFormat>) -> Result<ToolContext> {
    let api = build_client(config)?;
    let docs_base_url = config
        .docs_base_url
        .clone()
        .unwrap_or_else(|| tools::documentation::DEFAULT_DOCS_BASE_URL.to_string());
    Ok(ToolContext::new(api, output_format.unwrap_or(config.output_format), docs_base_url))
}

/// Build a server core over the full tool registry.
pub fn build_core(config: &PaylineConfig, output_format: Option<OutputFormat>) -> Result<PaylineMcpCore> {
    let context = build_context(config, output_format)?;
    Ok(PaylineMcpCore::new(Arc::new(ToolRegistry::default()), context))
}
