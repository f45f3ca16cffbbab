//! Payline API client.
//!
//! This crate provides a thin client for the Payline payments REST API. It
//! focuses on:
//!
//! - Constructing an HTTP client with the account's API key pair injected
//! - Picking the sandbox or production host from the public key, or a
//!   validated override
//! - Normalizing non-2xx responses, transport failures and undecodable bodies
//!   into [`ApiError`]
//!
//! Tool handlers talk to the API through the [`PaymentApi`] trait so tests can
//! substitute a recording stub. [`PaylineClient`] is the production
//! implementation.
//!
//! # Example
//!
//! ```ignore
//! use payline_api::{ApiRequest, Credentials, PaylineClient, PaymentApi};
//!
//! let client = PaylineClient::new(credentials, None)?;
//! let response = client.execute(ApiRequest::get("/v1/payments/pay_123")).await?;
//! println!("status: {}", response.status);
//! ```

mod model;

pub use model::{ApiError, ApiRequest, ApiResponse, Credentials};

use std::env;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use payline_types::ApiEnvironment;
use payline_util::{parse_response_json, redact_sensitive, status_error_message, upstream_error_message};
use reqwest::{Client, Url, header};
use serde_json::Value;
use tracing::debug;

/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];
/// Header carrying the idempotency key on mutating requests.
pub const IDEMPOTENCY_HEADER: &str = "X-Idempotency-Key";

/// The seam between tool handlers and the payment platform.
#[async_trait]
pub trait PaymentApi: Send + Sync {
    /// Account code merged into account-scoped requests that omit one.
    fn account_code(&self) -> &str;

    /// Perform one request against the payment API.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;

    /// Fetch a documentation page by absolute URL and return its text.
    async fn fetch_document(&self, url: &str) -> Result<String, ApiError>;
}

/// Thin wrapper around a configured `reqwest::Client` for Payline API access.
///
/// Credentials live in the client's default headers, marked sensitive so they
/// never show up in `Debug` output.
#[derive(Debug, Clone)]
pub struct PaylineClient {
    pub base_url: String,
    pub http: Client,
    pub user_agent: String,
    account_code: String,
    /// Credential-free client for documentation fetches.
    docs_http: Client,
}

impl PaylineClient {
    /// Construct a [`PaylineClient`] from credentials and an optional base URL override.
    ///
    /// Without an override the host follows the public key: `prod_` keys talk
    /// to production, everything else to the sandbox. Non-localhost overrides
    /// must use HTTPS.
    pub fn new(credentials: Credentials, base_url_override: Option<&str>) -> Result<Self> {
        let base_url = resolve_base_url(&credentials, base_url_override)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert("public-api-key", sensitive_header(&credentials.public_api_key, "public API key")?);
        default_headers.insert("private-secret-key", sensitive_header(&credentials.private_secret_key, "private secret key")?);
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        default_headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .build()
            .context("build http client")?;
        let docs_http = Client::builder().build().context("build documentation http client")?;

        debug!(%base_url, "payment API client configured");
        Ok(Self {
            base_url,
            http,
            user_agent: format!("payline-mcp/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
            account_code: credentials.account_code,
            docs_http,
        })
    }

    fn transport_error(error: reqwest::Error) -> ApiError {
        ApiError::Transport(redact_sensitive(&error.to_string()))
    }
}

#[async_trait]
impl PaymentApi for PaylineClient {
    fn account_code(&self) -> &str {
        &self.account_code
    }

    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, %url, "sending payment API request");

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(header::USER_AGENT, &self.user_agent);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(key) = &request.idempotency_key {
            builder = builder.header(IDEMPOTENCY_HEADER, key);
        }
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(Self::transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string())))
            .collect();
        let text = response.text().await.map_err(Self::transport_error)?;
        debug!(status, bytes = text.len(), "payment API responded");

        interpret_response(status, headers, &text)
    }

    async fn fetch_document(&self, url: &str) -> Result<String, ApiError> {
        debug!(%url, "fetching documentation page");
        let response = self
            .docs_http
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(Self::transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(Self::transport_error)?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("request failed").to_string(),
                body: Value::String(text),
            });
        }
        Ok(text)
    }
}

/// Turn a raw status, header set and body into an [`ApiResponse`] or [`ApiError`].
pub fn interpret_response(status: u16, headers: std::collections::BTreeMap<String, String>, text: &str) -> Result<ApiResponse, ApiError> {
    if (200..300).contains(&status) {
        let body = parse_response_json(text).map_err(|error| ApiError::Decode {
            status,
            message: error.to_string(),
        })?;
        return Ok(ApiResponse { status, headers, body });
    }

    let body = parse_response_json(text).unwrap_or_else(|_| Value::String(text.trim().to_string()));
    let message = upstream_error_message(&body)
        .or_else(|| status_error_message(status))
        .or_else(|| body.as_str().filter(|raw| !raw.is_empty() && raw.len() <= 512).map(str::to_string))
        .or_else(|| reqwest::StatusCode::from_u16(status).ok()?.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());
    Err(ApiError::Status { status, message, body })
}

/// Pick the base URL for a set of credentials.
pub fn resolve_base_url(credentials: &Credentials, base_url_override: Option<&str>) -> Result<String> {
    let base_url = match base_url_override.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => ApiEnvironment::from_public_key(&credentials.public_api_key)
            .default_base_url()
            .to_string(),
    };
    validate_base_url(&base_url)?;
    Ok(base_url)
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
pub fn validate_base_url(base: &str) -> Result<()> {
    let parsed_base_url = Url::parse(base).map_err(|e| anyhow!("Invalid PAYLINE_API_BASE URL '{}': {}", base, e))?;

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| anyhow!("PAYLINE_API_BASE must include a host"))?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    if parsed_base_url.scheme() != "https" {
        return Err(anyhow!(
            "PAYLINE_API_BASE must use https for non-localhost hosts; got '{}://'",
            parsed_base_url.scheme()
        ));
    }

    Ok(())
}

fn sensitive_header(value: &str, label: &str) -> Result<header::HeaderValue> {
    let mut header_value = header::HeaderValue::from_str(value.trim()).map_err(|_| anyhow!("{} contains characters not allowed in a header", label))?;
    header_value.set_sensitive(true);
    Ok(header_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn credentials(public_api_key: &str) -> Credentials {
        Credentials {
            account_code: "acct-0001".into(),
            public_api_key: public_api_key.into(),
            private_secret_key: "sk_secret".into(),
        }
    }

    #[test]
    fn base_url_follows_key_prefix_unless_overridden() {
        assert_eq!(resolve_base_url(&credentials("prod_abc"), None).unwrap(), "https://api.payline.dev");
        assert_eq!(resolve_base_url(&credentials("sandbox_abc"), None).unwrap(), "https://api-sandbox.payline.dev");
        assert_eq!(
            resolve_base_url(&credentials("prod_abc"), Some("http://localhost:8080/")).unwrap(),
            "http://localhost:8080"
        );
        assert_eq!(resolve_base_url(&credentials("prod_abc"), Some("   ")).unwrap(), "https://api.payline.dev");
    }

    #[test]
    fn non_localhost_overrides_must_use_https() {
        assert!(validate_base_url("http://api.example.com").is_err());
        assert!(validate_base_url("https://api.example.com").is_ok());
        assert!(validate_base_url("http://127.0.0.1:9000").is_ok());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn client_debug_output_hides_credentials() {
        let client = PaylineClient::new(credentials("sandbox_public"), None).unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("sk_secret"));
        assert_eq!(client.account_code(), "acct-0001");
    }

    #[test]
    fn successful_responses_decode_json_and_empty_bodies() {
        let response = interpret_response(200, BTreeMap::new(), r#"{"id":"pay_1"}"#).unwrap();
        assert_eq!(response.body, json!({"id": "pay_1"}));

        let response = interpret_response(204, BTreeMap::new(), "").unwrap();
        assert_eq!(response.body, Value::Null);

        let error = interpret_response(200, BTreeMap::new(), "<html>").unwrap_err();
        assert!(matches!(error, ApiError::Decode { status: 200, .. }));
    }

    #[test]
    fn error_responses_carry_upstream_message() {
        let error = interpret_response(400, BTreeMap::new(), r#"{"code":"INVALID","messages":["amount is required"]}"#).unwrap_err();
        match error {
            ApiError::Status { status, message, .. } => {
                assert_eq!(status, 400);
                assert_eq!(message, "amount is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let error = interpret_response(401, BTreeMap::new(), "").unwrap_err();
        assert!(error.to_string().contains("PAYLINE_PRIVATE_SECRET_KEY"));

        let error = interpret_response(502, BTreeMap::new(), "upstream gateway exploded").unwrap_err();
        assert!(error.to_string().contains("upstream gateway exploded"));
    }
}
