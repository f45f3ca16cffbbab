//! Configuration validation.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::PaylineConfig;

/// Validate URLs and the HTTP bind address.
pub fn validate_config(config: &PaylineConfig) -> Result<(), ValidationError> {
    if let Some(url) = &config.api_base_url {
        validate_base_url("apiBaseUrl", url)?;
    }
    if let Some(url) = &config.docs_base_url {
        validate_base_url("docsBaseUrl", url)?;
    }
    if let Some(address) = &config.http_server.bind_address {
        address.parse::<SocketAddr>().map_err(|error| ValidationError::InvalidBindAddress {
            address: address.clone(),
            reason: error.to_string(),
        })?;
    }
    Ok(())
}

fn validate_base_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let url = Url::parse(value).map_err(|error| ValidationError::InvalidUrl {
        field,
        reason: error.to_string(),
    })?;
    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ValidationError::InvalidUrl {
            field,
            reason: format!("Unsupported URL scheme: {} (expected http/https)", scheme),
        });
    }
    Ok(())
}

/// Errors that can occur during validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid URL in '{field}': {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("Invalid bind address '{address}': {reason}")]
    InvalidBindAddress { address: String, reason: String },
}
