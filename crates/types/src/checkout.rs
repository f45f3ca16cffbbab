//! Checkout session tool inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{Amount, Metadata};
use crate::payments::PaymentWorkflow;

/// Input for `checkoutSessionCreate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckoutSessionCreateRequest {
    /// Defaults to the configured account code.
    #[schemars(length(min = 36, max = 64))]
    pub account_id: Option<String>,
    #[schemars(length(min = 3, max = 255))]
    pub merchant_order_id: String,
    #[schemars(length(min = 1, max = 255))]
    pub payment_description: String,
    #[schemars(length(min = 2, max = 2), regex(pattern = r"^[A-Z]{2}$"))]
    pub country: String,
    pub amount: Amount,
    /// Platform customer the session is opened for.
    #[schemars(length(min = 36, max = 64))]
    pub customer_id: Option<String>,
    #[schemars(length(max = 526))]
    pub callback_url: Option<String>,
    pub workflow: Option<PaymentWorkflow>,
    /// Installment plan selection. Forwarded as-is.
    pub installments: Option<Value>,
    #[schemars(length(max = 120))]
    pub metadata: Option<Vec<Metadata>>,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}

/// Input for `checkoutSessionRetrievePaymentMethods`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckoutSessionRetrievePaymentMethodsRequest {
    #[serde(rename = "sessionId")]
    #[schemars(length(min = 36, max = 64))]
    pub session_id: String,
}

/// Input for `checkoutSessionCreateOtt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckoutSessionCreateOttRequest {
    #[serde(rename = "sessionId")]
    #[schemars(length(min = 36, max = 64))]
    pub session_id: String,
    /// Payment method to tokenize (type, vault_on_success, card details...).
    pub payment_method: Value,
    /// Payer information captured at checkout. Forwarded as-is.
    pub customer: Option<Value>,
    pub three_d_secure: Option<Value>,
    pub installment: Option<Value>,
    #[schemars(length(max = 255))]
    pub device_fingerprint: Option<String>,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}
