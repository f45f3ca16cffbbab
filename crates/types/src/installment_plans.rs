//! Installment plan tool inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::Currency;

/// One selectable installment option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InstallmentOption {
    #[schemars(range(min = 1, max = 48))]
    pub installment: u32,
    /// Interest rate applied to this option, in percent.
    #[schemars(range(min = 0))]
    pub rate: f64,
}

/// Amount window an installment plan applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InstallmentAmountRange {
    pub currency: Currency,
    #[schemars(range(min = 0))]
    pub min_value: Option<f64>,
    #[schemars(range(min = 0))]
    pub max_value: Option<f64>,
}

/// Input for `installmentPlanCreate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InstallmentPlanCreateRequest {
    /// Defaults to the configured account code.
    #[schemars(length(min = 36, max = 64))]
    pub account_id: Option<String>,
    #[schemars(length(min = 1, max = 255))]
    pub name: String,
    #[schemars(length(max = 255))]
    pub merchant_reference: Option<String>,
    #[schemars(length(min = 2, max = 2), regex(pattern = r"^[A-Z]{2}$"))]
    pub country: String,
    #[schemars(length(min = 1))]
    pub installments_plan: Vec<InstallmentOption>,
    pub amount: Option<InstallmentAmountRange>,
    /// Card brands the plan is restricted to (VISA, MASTERCARD, ...).
    pub brand: Option<Vec<String>>,
    /// Issuer names the plan is restricted to.
    pub issuer: Option<Vec<String>>,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}

/// Input for `installmentPlanRetrieve` and `installmentPlanDelete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InstallmentPlanIdRequest {
    #[serde(rename = "installmentPlanId")]
    #[schemars(length(min = 36, max = 64))]
    pub installment_plan_id: String,
}

/// Input for `installmentPlanRetrieveAll`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InstallmentPlanListRequest {
    /// Account whose plans are listed; defaults to the configured account code.
    #[schemars(length(min = 36, max = 64))]
    pub account_id: Option<String>,
}

/// Input for `installmentPlanUpdate`. Only the supplied fields are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InstallmentPlanUpdateRequest {
    #[serde(rename = "installmentPlanId")]
    #[schemars(length(min = 36, max = 64))]
    pub installment_plan_id: String,
    #[schemars(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[schemars(length(max = 255))]
    pub merchant_reference: Option<String>,
    #[schemars(length(min = 1))]
    pub installments_plan: Option<Vec<InstallmentOption>>,
    pub amount: Option<InstallmentAmountRange>,
    pub brand: Option<Vec<String>>,
    pub issuer: Option<Vec<String>>,
}
