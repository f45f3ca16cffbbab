//! Routing workflow tool inputs.
//!
//! The routing API sits behind a dashboard session: `routingLogin` returns a
//! session token that every other routing tool takes as `token`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input for `routingLogin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoutingLoginRequest {
    #[schemars(length(min = 3, max = 255), regex(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$"))]
    pub email: String,
    #[schemars(length(min = 1, max = 255))]
    pub password: String,
}

/// Input for `routingLogOut`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoutingSessionRequest {
    /// Session token returned by `routingLogin`.
    #[schemars(length(min = 1))]
    pub token: String,
}

/// Input for `routingGetProviders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoutingProvidersRequest {
    #[schemars(length(min = 1))]
    pub token: String,
    /// Payment method type to list connected providers for (CARD, PIX, ...).
    #[schemars(length(min = 1, max = 64))]
    pub payment_method_type: String,
    #[schemars(length(min = 2, max = 2), regex(pattern = r"^[A-Z]{2}$"))]
    pub country: Option<String>,
}

/// Input for `routingCreate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RoutingCreateRequest {
    #[schemars(length(min = 1))]
    pub token: String,
    #[schemars(length(min = 1, max = 255))]
    pub name: String,
    #[schemars(length(min = 1, max = 64))]
    pub payment_method_type: String,
    #[schemars(length(min = 2, max = 2), regex(pattern = r"^[A-Z]{2}$"))]
    pub country: Option<String>,
    /// Ordered routing conditions and provider fallbacks. Forwarded as-is.
    pub conditions: Value,
}

/// Input for `routingRetrieve` and `routingPost`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoutingWorkflowRequest {
    #[schemars(length(min = 1))]
    pub token: String,
    #[serde(rename = "workflowCode")]
    #[schemars(length(min = 36, max = 64))]
    pub workflow_code: String,
}

/// Input for `routingUpdate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RoutingUpdateRequest {
    #[schemars(length(min = 1))]
    pub token: String,
    #[serde(rename = "workflowCode")]
    #[schemars(length(min = 36, max = 64))]
    pub workflow_code: String,
    #[schemars(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub conditions: Option<Value>,
}
