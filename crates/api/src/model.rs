use std::collections::BTreeMap;
use std::fmt;

use reqwest::Method;
use serde_json::{Value, json};
use thiserror::Error;

/// Account credentials supplied once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account_code: String,
    pub public_api_key: String,
    pub private_secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_code", &self.account_code)
            .field("public_api_key", &self.public_api_key)
            .field("private_secret_key", &"<redacted>")
            .finish()
    }
}

/// One outbound call, fully resolved: path placeholders filled, query and body split out.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// API-relative path, e.g. `/v1/payments/pay_123`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub idempotency_key: Option<String>,
    /// Session token sent as `Authorization: Bearer ...`.
    pub bearer_token: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            idempotency_key: None,
            bearer_token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Decoded response of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    /// Parsed JSON body; `null` when the body was empty.
    pub body: Value,
}

impl ApiResponse {
    /// Status and headers as a JSON object, for tools that report response metadata.
    pub fn meta(&self) -> Value {
        json!({
            "status": self.status,
            "headers": self.headers,
        })
    }
}

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("payment API returned {status}: {message}")]
    Status { status: u16, message: String, body: Value },

    #[error("payment API request failed: {0}")]
    Transport(String),

    #[error("payment API returned an undecodable body ({status}): {message}")]
    Decode { status: u16, message: String },
}
