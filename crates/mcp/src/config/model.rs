//! Data models for the server configuration file.

use std::fmt;

use payline_api::Credentials;
use payline_types::OutputFormat;
use payline_util::InterpolationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Contents of `config.json`. Every field is optional; environment overrides fill gaps.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PaylineConfig {
    pub account_code: Option<String>,
    pub public_api_key: Option<String>,
    /// Supports `${env:NAME}` and `${secret:NAME}` placeholders.
    pub private_secret_key: Option<String>,
    /// Overrides the base URL derived from the public key prefix.
    pub api_base_url: Option<String>,
    pub docs_base_url: Option<String>,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub http_server: HttpServerConfig,
}

impl fmt::Debug for PaylineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaylineConfig")
            .field("account_code", &self.account_code)
            .field("public_api_key", &self.public_api_key)
            .field("private_secret_key", &self.private_secret_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("docs_base_url", &self.docs_base_url)
            .field("output_format", &self.output_format)
            .field("http_server", &self.http_server)
            .finish()
    }
}

impl PaylineConfig {
    /// Credentials when all three values are present and non-blank.
    pub fn credentials(&self) -> Option<Credentials> {
        let present = |value: &Option<String>| value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);
        let fields = (present(&self.account_code), present(&self.public_api_key), present(&self.private_secret_key));
        match fields {
            (Some(account_code), Some(public_api_key), Some(private_secret_key)) => Some(Credentials {
                account_code,
                public_api_key,
                private_secret_key,
            }),
            (None, None, None) => None,
            (account, public, private) => {
                warn!(
                    account_code = account.is_some(),
                    public_api_key = public.is_some(),
                    private_secret_key = private.is_some(),
                    "incomplete credentials; the payment API client stays uninitialized"
                );
                None
            }
        }
    }
}

/// Settings for `serve --transport http`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HttpServerConfig {
    /// Loopback bind address, e.g. `127.0.0.1:62890`.
    pub bind_address: Option<String>,
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    #[error("Validation error: {0}")]
    Validation(#[from] crate::config::ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_camel_case_config() {
        let json = r#"{
          "accountCode": "acct-0001",
          "publicApiKey": "sandbox_pk_123",
          "privateSecretKey": "${secret:PAYLINE_PRIVATE_SECRET_KEY}",
          "docsBaseUrl": "https://docs.payline.dev",
          "outputFormat": "object",
          "httpServer": { "bindAddress": "127.0.0.1:7000" }
        }"#;

        let config: PaylineConfig = serde_json::from_str(json).expect("config deserializes");
        assert_eq!(config.account_code.as_deref(), Some("acct-0001"));
        assert_eq!(config.output_format, OutputFormat::Object);
        assert_eq!(config.http_server.bind_address.as_deref(), Some("127.0.0.1:7000"));
        assert!(config.api_base_url.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = serde_json::from_str::<PaylineConfig>(r#"{"apiKey": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn credentials_require_all_three_values() {
        let mut config = PaylineConfig {
            account_code: Some("acct".into()),
            public_api_key: Some("pk".into()),
            private_secret_key: Some("  ".into()),
            ..Default::default()
        };
        assert!(config.credentials().is_none());

        config.private_secret_key = Some("sk".into());
        let credentials = config.credentials().expect("credentials");
        assert_eq!(credentials.account_code, "acct");
        assert_eq!(credentials.private_secret_key, "sk");
    }

    #[test]
    fn debug_output_hides_private_key() {
        let config = PaylineConfig {
            private_secret_key: Some("sk_live_secret".into()),
            ..Default::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk_live_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
