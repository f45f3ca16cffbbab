//! Customer tool inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{Address, Document, Metadata, Phone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "NB")]
    NonBinary,
}

/// Optional customer profile fields shared by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CustomerProfile {
    #[schemars(length(min = 1, max = 80))]
    pub first_name: Option<String>,
    #[schemars(length(min = 1, max = 80))]
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    /// Date of birth as `YYYY-MM-DD`.
    #[schemars(regex(pattern = r"^\d{4}-\d{2}-\d{2}$"))]
    pub date_of_birth: Option<String>,
    #[schemars(length(min = 3, max = 255), regex(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$"))]
    pub email: Option<String>,
    /// Two-letter nationality code.
    #[schemars(length(min = 2, max = 2), regex(pattern = r"^[A-Z]{2}$"))]
    pub nationality: Option<String>,
    /// Two-letter country of residence code.
    #[schemars(length(min = 2, max = 2), regex(pattern = r"^[A-Z]{2}$"))]
    pub country: Option<String>,
    pub document: Option<Document>,
    pub phone: Option<Phone>,
    pub billing_address: Option<Address>,
    pub shipping_address: Option<Address>,
    #[schemars(length(max = 120))]
    pub metadata: Option<Vec<Metadata>>,
    /// When the customer was created on the merchant side (ISO-8601).
    pub merchant_customer_created_at: Option<String>,
}

/// Input for `customerCreate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CustomerCreateRequest {
    /// Merchant-side identifier for the customer.
    #[schemars(length(min = 1, max = 255))]
    pub merchant_customer_id: String,
    #[serde(flatten)]
    pub profile: CustomerProfile,
    /// Idempotency key; generated when omitted.
    #[schemars(length(min = 1, max = 64))]
    pub idempotency_key: Option<String>,
}

/// Input for `customerRetrieve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CustomerRetrieveRequest {
    #[serde(rename = "customerId")]
    #[schemars(length(min = 36, max = 64))]
    pub customer_id: String,
}

/// Input for `customerRetrieveByExternalId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CustomerRetrieveByExternalIdRequest {
    /// Merchant-side identifier used when the customer was created.
    #[schemars(length(min = 1, max = 255))]
    pub merchant_customer_id: String,
}

/// Input for `customerUpdate`. Only the supplied fields are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CustomerUpdateRequest {
    #[serde(rename = "customerId")]
    #[schemars(length(min = 36, max = 64))]
    pub customer_id: String,
    #[schemars(length(min = 1, max = 255))]
    pub merchant_customer_id: Option<String>,
    #[serde(flatten)]
    pub profile: CustomerProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_accepts_minimal_payload() {
        let request: CustomerCreateRequest =
            serde_json::from_value(json!({"merchant_customer_id": "abc", "email": "test@example.com"})).expect("deserialize");
        assert_eq!(request.merchant_customer_id, "abc");
        assert_eq!(request.profile.email.as_deref(), Some("test@example.com"));
        assert!(request.idempotency_key.is_none());
    }

    #[test]
    fn update_schema_exposes_camel_case_identifier() {
        let schema = serde_json::to_value(schemars::schema_for!(CustomerUpdateRequest)).expect("schema");
        assert!(schema["properties"].get("customerId").is_some(), "schema: {schema}");
        let required = schema["required"].as_array().expect("required");
        assert_eq!(required, &vec![json!("customerId")]);
    }
}
