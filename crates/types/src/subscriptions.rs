//! Subscription tool inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{Amount, Metadata};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrequencyType {
    Day,
    Week,
    Month,
    Year,
}

/// Billing cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Frequency {
    #[serde(rename = "type")]
    pub frequency_type: FrequencyType,
    #[schemars(range(min = 1, max = 365))]
    pub value: u32,
}

/// Number of billing cycles and optional trial period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BillingCycles {
    #[schemars(range(min = 1))]
    pub total: Option<u32>,
    pub trial_period: Option<u32>,
}

/// Input for `subscriptionCreate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubscriptionCreateRequest {
    /// Defaults to the configured account code.
    #[schemars(length(min = 36, max = 64))]
    pub account_id: Option<String>,
    #[schemars(length(min = 1, max = 255))]
    pub name: String,
    #[schemars(length(max = 255))]
    pub description: Option<String>,
    #[schemars(length(min = 3, max = 255))]
    pub merchant_reference: Option<String>,
    #[schemars(length(min = 2, max = 2), regex(pattern = r"^[A-Z]{2}$"))]
    pub country: String,
    pub amount: Amount,
    pub frequency: Frequency,
    pub billing_cycles: Option<BillingCycles>,
    /// Subscriber reference (`id` of an existing customer). Forwarded as-is.
    pub customer_payer: Value,
    /// Vaulted payment method to charge on each cycle. Forwarded as-is.
    pub payment_method: Value,
    /// First charge date as `YYYY-MM-DD`.
    #[schemars(regex(pattern = r"^\d{4}-\d{2}-\d{2}$"))]
    pub start_date: Option<String>,
    #[schemars(length(max = 120))]
    pub metadata: Option<Vec<Metadata>>,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}

/// Input for `subscriptionRetrieve`, `subscriptionPause` and `subscriptionResume`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubscriptionIdRequest {
    #[serde(rename = "subscriptionId")]
    #[schemars(length(min = 36, max = 64))]
    pub subscription_id: String,
}

/// Input for `subscriptionUpdate`. Only the supplied fields are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubscriptionUpdateRequest {
    #[serde(rename = "subscriptionId")]
    #[schemars(length(min = 36, max = 64))]
    pub subscription_id: String,
    #[schemars(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[schemars(length(max = 255))]
    pub description: Option<String>,
    pub amount: Option<Amount>,
    pub frequency: Option<Frequency>,
    pub billing_cycles: Option<BillingCycles>,
    pub payment_method: Option<Value>,
    #[schemars(length(max = 120))]
    pub metadata: Option<Vec<Metadata>>,
}

/// Input for `subscriptionCancel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubscriptionCancelRequest {
    #[serde(rename = "subscriptionId")]
    #[schemars(length(min = 36, max = 64))]
    pub subscription_id: String,
    #[schemars(length(max = 255))]
    pub reason: Option<String>,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}
