//! Shared type definitions for the Payline MCP server.
//!
//! The request shapes in this crate are declarative: they exist to publish a
//! JSON schema for each tool and to give the dispatcher a typed gate that the
//! raw caller input must pass before anything is sent upstream.

pub mod checkout;
pub mod common;
pub mod customers;
pub mod documentation;
pub mod envelope;
pub mod installment_plans;
pub mod payment_links;
pub mod payments;
pub mod recipients;
pub mod routing;
pub mod subscriptions;

pub use common::{Address, Amount, Currency, CustomerPayer, Document, Metadata, Phone};
pub use documentation::{DocumentationReadRequest, DocumentationTopic};
pub use envelope::{ContentEnvelope, ContentItem, OutputFormat, ParseOutputFormatError};

/// Payment platform environment a set of credentials belongs to.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default)]
pub enum ApiEnvironment {
    #[default]
    Sandbox, // https://api-sandbox.payline.dev
    Production, // https://api.payline.dev
}

impl ApiEnvironment {
    /// Infer the environment from a public API key.
    ///
    /// Production keys carry a `prod_` prefix. Every other key resolves to the sandbox.
    pub fn from_public_key(public_api_key: &str) -> Self {
        if public_api_key.trim_start().starts_with("prod_") {
            Self::Production
        } else {
            Self::Sandbox
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://api-sandbox.payline.dev",
            Self::Production => "https://api.payline.dev",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_follows_public_key_prefix() {
        assert_eq!(ApiEnvironment::from_public_key("prod_abc123"), ApiEnvironment::Production);
        assert_eq!(ApiEnvironment::from_public_key("sandbox_abc123"), ApiEnvironment::Sandbox);
        assert_eq!(ApiEnvironment::from_public_key("anything-else"), ApiEnvironment::Sandbox);
    }
}
