//! Building blocks shared by several resource shapes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ISO-4217 currency codes accepted by the payment platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Ars,
    Bob,
    Brl,
    Cad,
    Clp,
    Cop,
    Crc,
    Dop,
    Eur,
    Gbp,
    Gtq,
    Hnl,
    Jmd,
    Mxn,
    Nio,
    Pab,
    Pen,
    Pyg,
    Svc,
    Usd,
    Uyu,
}

/// Monetary amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Amount {
    pub currency: Currency,
    /// Amount in major units (e.g. 10.50).
    #[schemars(range(min = 0))]
    pub value: f64,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Address {
    /// Two-letter ISO-3166 country code.
    #[schemars(length(min = 2, max = 2), regex(pattern = r"^[A-Z]{2}$"))]
    pub country: Option<String>,
    #[schemars(length(max = 255))]
    pub state: Option<String>,
    #[schemars(length(max = 255))]
    pub city: Option<String>,
    #[schemars(length(max = 255))]
    pub zip_code: Option<String>,
    #[schemars(length(max = 255))]
    pub address_line_1: Option<String>,
    #[schemars(length(max = 255))]
    pub address_line_2: Option<String>,
    #[schemars(length(max = 255))]
    pub neighborhood: Option<String>,
}

/// Phone number split into country calling code and local number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Phone {
    #[schemars(length(min = 1, max = 3), regex(pattern = r"^[0-9]{1,3}$"))]
    pub country_code: String,
    #[schemars(length(min = 1, max = 32))]
    pub number: String,
}

/// Identity document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    /// Document kind as named by the platform (CPF, CNPJ, DNI, PASSPORT...).
    #[schemars(length(min = 2, max = 10))]
    pub document_type: String,
    #[schemars(length(min = 3, max = 40))]
    pub document_number: String,
}

/// Free-form key/value pair attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    #[schemars(length(min = 1, max = 48))]
    pub key: String,
    #[schemars(length(max = 512))]
    pub value: String,
}

/// Customer details embedded in payments, checkout sessions and payment links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CustomerPayer {
    /// Platform customer identifier.
    #[schemars(length(min = 36, max = 64))]
    pub id: Option<String>,
    #[schemars(length(max = 255))]
    pub merchant_customer_id: Option<String>,
    #[schemars(length(max = 80))]
    pub first_name: Option<String>,
    #[schemars(length(max = 80))]
    pub last_name: Option<String>,
    #[schemars(length(max = 255))]
    pub email: Option<String>,
    pub phone: Option<Phone>,
    pub document: Option<Document>,
    pub billing_address: Option<Address>,
    pub shipping_address: Option<Address>,
}
