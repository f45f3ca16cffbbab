//! Recipient (payout beneficiary / marketplace seller) tool inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{Address, Document, Phone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Individual,
    Entity,
}

/// Optional recipient fields shared by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecipientProfile {
    #[schemars(length(min = 1, max = 80))]
    pub first_name: Option<String>,
    #[schemars(length(min = 1, max = 80))]
    pub last_name: Option<String>,
    #[schemars(length(min = 1, max = 255))]
    pub legal_name: Option<String>,
    #[schemars(length(min = 3, max = 255), regex(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$"))]
    pub email: Option<String>,
    #[schemars(length(min = 2, max = 2), regex(pattern = r"^[A-Z]{2}$"))]
    pub country: Option<String>,
    pub document: Option<Document>,
    pub phone: Option<Phone>,
    pub address: Option<Address>,
    /// Bank account used for settlements. Forwarded as-is.
    pub withdrawal_methods: Option<Value>,
}

/// Input for `recipientCreate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecipientCreateRequest {
    /// Defaults to the configured account code.
    #[schemars(length(min = 36, max = 64))]
    pub account_id: Option<String>,
    #[schemars(length(min = 1, max = 255))]
    pub merchant_recipient_id: String,
    pub entity_type: EntityType,
    #[serde(flatten)]
    pub profile: RecipientProfile,
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}

/// Input for `recipientRetrieve` and `recipientDelete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecipientIdRequest {
    #[serde(rename = "recipientId")]
    #[schemars(length(min = 36, max = 64))]
    pub recipient_id: String,
}

/// Input for `recipientUpdate`. Only the supplied fields are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecipientUpdateRequest {
    #[serde(rename = "recipientId")]
    #[schemars(length(min = 36, max = 64))]
    pub recipient_id: String,
    pub entity_type: Option<EntityType>,
    #[serde(flatten)]
    pub profile: RecipientProfile,
}
