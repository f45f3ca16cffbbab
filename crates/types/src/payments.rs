//! Payment tool inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{Amount, CustomerPayer, Metadata};

/// How the payment is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentWorkflow {
    SdkCheckout,
    Direct,
    Redirect,
}

/// Reason reported for refunds and cancellations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReversalReason {
    Duplicate,
    Fraudulent,
    RequestedByCustomer,
}

/// Input for `paymentCreate` and `paymentAuthorize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentCreateRequest {
    /// Account the payment belongs to; defaults to the configured account code.
    #[schemars(length(min = 36, max = 64))]
    pub account_id: Option<String>,
    #[schemars(length(min = 1, max = 255))]
    pub description: String,
    /// Merchant order identifier, unique per payment attempt.
    #[schemars(length(min = 3, max = 255))]
    pub merchant_order_id: String,
    #[schemars(length(min = 2, max = 2), regex(pattern = r"^[A-Z]{2}$"))]
    pub country: String,
    pub amount: Amount,
    pub customer_payer: Option<CustomerPayer>,
    /// Payment method block (type, token, vaulted_token, detail...). Forwarded as-is.
    pub payment_method: Value,
    pub workflow: Option<PaymentWorkflow>,
    #[schemars(length(max = 255))]
    pub merchant_reference: Option<String>,
    #[schemars(length(max = 526))]
    pub callback_url: Option<String>,
    /// Airline, order and seller details. Forwarded as-is.
    pub additional_data: Option<Value>,
    /// Marketplace split instructions. Forwarded as-is.
    pub split_marketplace: Option<Value>,
    #[schemars(length(max = 120))]
    pub metadata: Option<Vec<Metadata>>,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}

/// Input for `paymentAuthorize`. Same shape as a create; capture is forced off.
pub type PaymentAuthorizeRequest = PaymentCreateRequest;

/// Input for `paymentRetrieve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentRetrieveRequest {
    #[serde(rename = "paymentId")]
    #[schemars(length(min = 36, max = 64))]
    pub payment_id: String,
}

/// Input for `paymentRetrieveByMerchantOrderId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentRetrieveByMerchantOrderIdRequest {
    #[schemars(length(min = 3, max = 255))]
    pub merchant_order_id: String,
}

/// Descriptive fields shared by reversals (refund, cancel, capture).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReversalDetails {
    #[schemars(length(min = 1, max = 255))]
    pub description: Option<String>,
    pub reason: Option<ReversalReason>,
    #[schemars(length(max = 255))]
    pub merchant_reference: Option<String>,
}

/// Input for `paymentRefund`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentRefundRequest {
    #[serde(rename = "paymentId")]
    #[schemars(length(min = 36, max = 64))]
    pub payment_id: String,
    #[serde(rename = "transactionId")]
    #[schemars(length(min = 36, max = 64))]
    pub transaction_id: String,
    #[serde(flatten)]
    pub details: ReversalDetails,
    /// Partial refund amount; the full amount is refunded when omitted.
    pub amount: Option<Amount>,
    pub customer_payer: Option<CustomerPayer>,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}

/// Input for `paymentCancel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentCancelRequest {
    #[serde(rename = "paymentId")]
    #[schemars(length(min = 36, max = 64))]
    pub payment_id: String,
    #[serde(rename = "transactionId")]
    #[schemars(length(min = 36, max = 64))]
    pub transaction_id: String,
    #[serde(flatten)]
    pub details: ReversalDetails,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}

/// Input for `paymentCancelOrRefund`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentCancelOrRefundRequest {
    #[serde(rename = "paymentId")]
    #[schemars(length(min = 36, max = 64))]
    pub payment_id: String,
    #[serde(flatten)]
    pub details: ReversalDetails,
    pub amount: Option<Amount>,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}

/// Input for `paymentCancelOrRefundWithTransaction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentCancelOrRefundWithTransactionRequest {
    #[serde(rename = "paymentId")]
    #[schemars(length(min = 36, max = 64))]
    pub payment_id: String,
    #[serde(rename = "transactionId")]
    #[schemars(length(min = 36, max = 64))]
    pub transaction_id: String,
    #[serde(flatten)]
    pub details: ReversalDetails,
    pub amount: Option<Amount>,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}

/// Input for `paymentCaptureAuthorization`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentCaptureAuthorizationRequest {
    #[serde(rename = "paymentId")]
    #[schemars(length(min = 36, max = 64))]
    pub payment_id: String,
    #[serde(rename = "transactionId")]
    #[schemars(length(min = 36, max = 64))]
    pub transaction_id: String,
    /// Amount to capture; the authorized amount is captured when omitted.
    pub amount: Option<Amount>,
    #[schemars(length(max = 255))]
    pub merchant_reference: Option<String>,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn capture_requires_payment_and_transaction_ids() {
        let schema = serde_json::to_value(schemars::schema_for!(PaymentCaptureAuthorizationRequest)).expect("schema");
        let required: Vec<&str> = schema["required"]
            .as_array()
            .expect("required")
            .iter()
            .filter_map(|value| value.as_str())
            .collect();
        assert!(required.contains(&"paymentId"));
        assert!(required.contains(&"transactionId"));
    }

    #[test]
    fn reversal_reason_uses_screaming_snake_case() {
        let reason: ReversalReason = serde_json::from_value(json!("REQUESTED_BY_CUSTOMER")).expect("reason");
        assert_eq!(reason, ReversalReason::RequestedByCustomer);
    }
}
