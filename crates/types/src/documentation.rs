//! Documentation reader input.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Static documentation pages the reader can fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentationTopic {
    Overview,
    Authentication,
    Customers,
    Payments,
    CheckoutSessions,
    Subscriptions,
    PaymentLinks,
    Recipients,
    InstallmentPlans,
    Routing,
    Webhooks,
    Errors,
    TestCards,
}

impl DocumentationTopic {
    /// Page path relative to the documentation base URL.
    pub fn page_path(&self) -> &'static str {
        match self {
            Self::Overview => "/docs/overview.md",
            Self::Authentication => "/docs/authentication.md",
            Self::Customers => "/reference/customers.md",
            Self::Payments => "/reference/payments.md",
            Self::CheckoutSessions => "/reference/checkout-sessions.md",
            Self::Subscriptions => "/reference/subscriptions.md",
            Self::PaymentLinks => "/reference/payment-links.md",
            Self::Recipients => "/reference/recipients.md",
            Self::InstallmentPlans => "/reference/installment-plans.md",
            Self::Routing => "/docs/routing.md",
            Self::Webhooks => "/docs/webhooks.md",
            Self::Errors => "/reference/errors.md",
            Self::TestCards => "/docs/test-cards.md",
        }
    }
}

/// Input for `documentationRead`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentationReadRequest {
    /// Topic keyword to read.
    pub keyword: DocumentationTopic,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keywords_are_kebab_case() {
        let request: DocumentationReadRequest = serde_json::from_value(json!({"keyword": "payment-links"})).expect("deserialize");
        assert_eq!(request.keyword, DocumentationTopic::PaymentLinks);
        assert_eq!(request.keyword.page_path(), "/reference/payment-links.md");
    }
}
