//! Payment link tool inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{Amount, CustomerPayer, Metadata};

/// Input for `paymentLinkCreate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentLinkCreateRequest {
    /// Defaults to the configured account code.
    #[schemars(length(min = 36, max = 64))]
    pub account_id: Option<String>,
    #[schemars(length(min = 1, max = 255))]
    pub description: String,
    #[schemars(length(min = 2, max = 2), regex(pattern = r"^[A-Z]{2}$"))]
    pub country: String,
    pub amount: Amount,
    #[schemars(length(min = 3, max = 255))]
    pub merchant_order_id: Option<String>,
    /// Payment method types offered on the hosted page (CARD, PIX, ...).
    #[schemars(length(min = 1))]
    pub payment_method_types: Vec<String>,
    pub customer_payer: Option<CustomerPayer>,
    /// Expiration timestamp (ISO-8601).
    pub expiration_date: Option<String>,
    /// Whether the link accepts more than one successful payment.
    pub one_time_use: Option<bool>,
    #[schemars(length(max = 526))]
    pub callback_url: Option<String>,
    /// Installment plan selection. Forwarded as-is.
    pub installments: Option<Value>,
    #[schemars(length(max = 120))]
    pub metadata: Option<Vec<Metadata>>,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}

/// Input for `paymentLinkRetrieve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentLinkRetrieveRequest {
    #[serde(rename = "paymentLinkId")]
    #[schemars(length(min = 36, max = 64))]
    pub payment_link_id: String,
}

/// Input for `paymentLinkCancel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentLinkCancelRequest {
    #[serde(rename = "paymentLinkId")]
    #[schemars(length(min = 36, max = 64))]
    pub payment_link_id: String,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}
