//! The Payline tool table.

use payline_types::{
    DocumentationReadRequest,
    checkout::{CheckoutSessionCreateOttRequest, CheckoutSessionCreateRequest, CheckoutSessionRetrievePaymentMethodsRequest},
    customers::{CustomerCreateRequest, CustomerRetrieveByExternalIdRequest, CustomerRetrieveRequest, CustomerUpdateRequest},
    installment_plans::{InstallmentPlanCreateRequest, InstallmentPlanIdRequest, InstallmentPlanListRequest, InstallmentPlanUpdateRequest},
    payment_links::{PaymentLinkCancelRequest, PaymentLinkCreateRequest, PaymentLinkRetrieveRequest},
    payments::{
        PaymentAuthorizeRequest, PaymentCancelOrRefundRequest, PaymentCancelOrRefundWithTransactionRequest, PaymentCancelRequest,
        PaymentCaptureAuthorizationRequest, PaymentCreateRequest, PaymentRefundRequest, PaymentRetrieveByMerchantOrderIdRequest,
        PaymentRetrieveRequest,
    },
    recipients::{RecipientCreateRequest, RecipientIdRequest, RecipientUpdateRequest},
    routing::{
        RoutingCreateRequest, RoutingLoginRequest, RoutingProvidersRequest, RoutingSessionRequest, RoutingUpdateRequest,
        RoutingWorkflowRequest,
    },
    subscriptions::{SubscriptionCancelRequest, SubscriptionCreateRequest, SubscriptionIdRequest, SubscriptionUpdateRequest},
};
use reqwest::Method;
use serde_json::Value;

use super::{ACCOUNT_FIELD, DefaultRule, Endpoint, ToolAction, ToolDescriptor};

/// Builder steps used by the table below.
impl ToolDescriptor {
    fn route(mut self, method: Method, path: &'static str) -> Self {
        self.read_only = method == Method::GET;
        self.destructive = method == Method::DELETE;
        self.action = ToolAction::Endpoint(Endpoint {
            method,
            path,
            query: &[],
            bearer: None,
        });
        self
    }

    fn get(self, path: &'static str) -> Self {
        self.route(Method::GET, path)
    }

    fn post(self, path: &'static str) -> Self {
        self.route(Method::POST, path)
    }

    fn patch(self, path: &'static str) -> Self {
        self.route(Method::PATCH, path)
    }

    fn delete(self, path: &'static str) -> Self {
        self.route(Method::DELETE, path)
    }

    fn query(mut self, fields: &'static [&'static str]) -> Self {
        if let ToolAction::Endpoint(endpoint) = &mut self.action {
            endpoint.query = fields;
        }
        self
    }

    fn bearer(mut self, field: &'static str) -> Self {
        if let ToolAction::Endpoint(endpoint) = &mut self.action {
            endpoint.bearer = Some(field);
        }
        self
    }

    fn account_default(mut self) -> Self {
        self.defaults.push(DefaultRule::Account { field: ACCOUNT_FIELD });
        self
    }

    fn force(mut self, pointer: &'static str, value: Value) -> Self {
        self.defaults.push(DefaultRule::Force { pointer, value });
        self
    }

    fn idempotent(mut self) -> Self {
        self.idempotent = true;
        self
    }

    fn response_meta(mut self) -> Self {
        self.response_meta = true;
        self
    }

    fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }
}

/// Every tool the server exposes, in publication order.
pub fn payline_tools() -> Vec<ToolDescriptor> {
    let mut tools = Vec::with_capacity(48);
    tools.extend(customer_tools());
    tools.extend(payment_tools());
    tools.extend(checkout_tools());
    tools.extend(subscription_tools());
    tools.extend(payment_link_tools());
    tools.extend(recipient_tools());
    tools.extend(installment_plan_tools());
    tools.extend(routing_tools());
    tools.push(ToolDescriptor::for_input::<DocumentationReadRequest>(
        "documentationRead",
        "Read documentation",
        "Fetch a Payline documentation page by keyword (overview, authentication, payments, customers, checkout-sessions, \
         subscriptions, payment-links, recipients, installment-plans, routing, webhooks, errors, test-cards). Returns the page text.",
    ));
    tools
}

fn customer_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::for_input::<CustomerCreateRequest>(
            "customerCreate",
            "Create customer",
            "Create a customer record. merchant_customer_id is your own identifier; every other profile field is optional. \
             Returns the customer including its Payline id.",
        )
        .post("/v1/customers")
        .idempotent(),
        ToolDescriptor::for_input::<CustomerRetrieveRequest>(
            "customerRetrieve",
            "Retrieve customer",
            "Retrieve a customer by its Payline id (customerId).",
        )
        .get("/v1/customers/{customerId}"),
        ToolDescriptor::for_input::<CustomerRetrieveByExternalIdRequest>(
            "customerRetrieveByExternalId",
            "Retrieve customer by merchant id",
            "Retrieve a customer by the merchant_customer_id supplied at creation.",
        )
        .get("/v1/customers")
        .query(&["merchant_customer_id"]),
        ToolDescriptor::for_input::<CustomerUpdateRequest>(
            "customerUpdate",
            "Update customer",
            "Update a customer. Only the supplied fields change; omitted fields keep their current values.",
        )
        .patch("/v1/customers/{customerId}"),
    ]
}

fn payment_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::for_input::<PaymentCreateRequest>(
            "paymentCreate",
            "Create payment",
            "Create and process a payment. account_id defaults to the configured account. An idempotency key is generated \
             when none is supplied. Returns the payment plus a second item with the HTTP status and headers.",
        )
        .post("/v1/payments")
        .account_default()
        .idempotent()
        .response_meta(),
        ToolDescriptor::for_input::<PaymentRetrieveRequest>(
            "paymentRetrieve",
            "Retrieve payment",
            "Retrieve a payment and its transactions by paymentId.",
        )
        .get("/v1/payments/{paymentId}"),
        ToolDescriptor::for_input::<PaymentRetrieveByMerchantOrderIdRequest>(
            "paymentRetrieveByMerchantOrderId",
            "Retrieve payments by merchant order id",
            "List the payments created with a given merchant_order_id.",
        )
        .get("/v1/payments")
        .query(&["merchant_order_id"]),
        ToolDescriptor::for_input::<PaymentRefundRequest>(
            "paymentRefund",
            "Refund payment",
            "Refund a captured transaction, fully or partially (amount). Requires paymentId and transactionId.",
        )
        .post("/v1/payments/{paymentId}/transactions/{transactionId}/refund")
        .idempotent()
        .response_meta()
        .destructive(),
        ToolDescriptor::for_input::<PaymentCancelRequest>(
            "paymentCancel",
            "Cancel payment",
            "Cancel a pending or authorized transaction before it is captured.",
        )
        .post("/v1/payments/{paymentId}/transactions/{transactionId}/cancel")
        .idempotent()
        .response_meta()
        .destructive(),
        ToolDescriptor::for_input::<PaymentCancelOrRefundRequest>(
            "paymentCancelOrRefund",
            "Cancel or refund payment",
            "Cancel the payment if it is not captured yet, otherwise refund it. The platform picks the last transaction.",
        )
        .post("/v1/payments/{paymentId}/cancel-or-refund")
        .idempotent()
        .response_meta()
        .destructive(),
        ToolDescriptor::for_input::<PaymentCancelOrRefundWithTransactionRequest>(
            "paymentCancelOrRefundWithTransaction",
            "Cancel or refund transaction",
            "Cancel or refund a specific transaction of a payment, depending on whether it was captured.",
        )
        .post("/v1/payments/{paymentId}/transactions/{transactionId}/cancel-or-refund")
        .idempotent()
        .response_meta()
        .destructive(),
        ToolDescriptor::for_input::<PaymentAuthorizeRequest>(
            "paymentAuthorize",
            "Authorize payment",
            "Authorize a card payment without capturing it (capture is forced to false). Capture later with \
             paymentCaptureAuthorization or release it with paymentCancel.",
        )
        .post("/v1/payments")
        .account_default()
        .force("/payment_method/detail/card/capture", Value::Bool(false))
        .idempotent()
        .response_meta(),
        ToolDescriptor::for_input::<PaymentCaptureAuthorizationRequest>(
            "paymentCaptureAuthorization",
            "Capture authorization",
            "Capture a previously authorized transaction, fully or partially (amount).",
        )
        .post("/v1/payments/{paymentId}/transactions/{transactionId}/capture")
        .idempotent()
        .response_meta(),
    ]
}

fn checkout_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::for_input::<CheckoutSessionCreateRequest>(
            "checkoutSessionCreate",
            "Create checkout session",
            "Open a checkout session for a customer and amount. account_id defaults to the configured account.",
        )
        .post("/v1/checkout/sessions")
        .account_default()
        .idempotent(),
        ToolDescriptor::for_input::<CheckoutSessionRetrievePaymentMethodsRequest>(
            "checkoutSessionRetrievePaymentMethods",
            "List checkout payment methods",
            "List the payment methods available for a checkout session.",
        )
        .get("/v1/checkout/sessions/{sessionId}/payment-methods"),
        ToolDescriptor::for_input::<CheckoutSessionCreateOttRequest>(
            "checkoutSessionCreateOtt",
            "Create one-time token",
            "Tokenize a payment method for a checkout session, returning a one-time token to use in paymentCreate.",
        )
        .post("/v1/checkout/sessions/{sessionId}/ott")
        .idempotent(),
    ]
}

fn subscription_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::for_input::<SubscriptionCreateRequest>(
            "subscriptionCreate",
            "Create subscription",
            "Create a recurring subscription charging a vaulted payment method on a fixed frequency.",
        )
        .post("/v1/subscriptions")
        .account_default()
        .idempotent(),
        ToolDescriptor::for_input::<SubscriptionIdRequest>(
            "subscriptionRetrieve",
            "Retrieve subscription",
            "Retrieve a subscription by subscriptionId.",
        )
        .get("/v1/subscriptions/{subscriptionId}"),
        ToolDescriptor::for_input::<SubscriptionIdRequest>(
            "subscriptionPause",
            "Pause subscription",
            "Pause billing for an active subscription.",
        )
        .post("/v1/subscriptions/{subscriptionId}/pause"),
        ToolDescriptor::for_input::<SubscriptionIdRequest>(
            "subscriptionResume",
            "Resume subscription",
            "Resume billing for a paused subscription.",
        )
        .post("/v1/subscriptions/{subscriptionId}/resume"),
        ToolDescriptor::for_input::<SubscriptionUpdateRequest>(
            "subscriptionUpdate",
            "Update subscription",
            "Update a subscription. Only the supplied fields change.",
        )
        .patch("/v1/subscriptions/{subscriptionId}"),
        ToolDescriptor::for_input::<SubscriptionCancelRequest>(
            "subscriptionCancel",
            "Cancel subscription",
            "Cancel a subscription permanently. No further cycles are billed.",
        )
        .post("/v1/subscriptions/{subscriptionId}/cancel")
        .idempotent()
        .destructive(),
    ]
}

fn payment_link_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::for_input::<PaymentLinkCreateRequest>(
            "paymentLinkCreate",
            "Create payment link",
            "Create a hosted payment link for an amount. account_id defaults to the configured account.",
        )
        .post("/v1/payment-links")
        .account_default()
        .idempotent(),
        ToolDescriptor::for_input::<PaymentLinkRetrieveRequest>(
            "paymentLinkRetrieve",
            "Retrieve payment link",
            "Retrieve a payment link and its payments by paymentLinkId.",
        )
        .get("/v1/payment-links/{paymentLinkId}"),
        ToolDescriptor::for_input::<PaymentLinkCancelRequest>(
            "paymentLinkCancel",
            "Cancel payment link",
            "Cancel a payment link so it no longer accepts payments.",
        )
        .post("/v1/payment-links/{paymentLinkId}/cancel")
        .idempotent()
        .destructive(),
    ]
}

fn recipient_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::for_input::<RecipientCreateRequest>(
            "recipientCreate",
            "Create recipient",
            "Create a recipient (marketplace seller or payout beneficiary). account_id defaults to the configured account.",
        )
        .post("/v1/recipients")
        .account_default()
        .idempotent(),
        ToolDescriptor::for_input::<RecipientIdRequest>(
            "recipientRetrieve",
            "Retrieve recipient",
            "Retrieve a recipient by recipientId.",
        )
        .get("/v1/recipients/{recipientId}"),
        ToolDescriptor::for_input::<RecipientUpdateRequest>(
            "recipientUpdate",
            "Update recipient",
            "Update a recipient. Only the supplied fields change.",
        )
        .patch("/v1/recipients/{recipientId}"),
        ToolDescriptor::for_input::<RecipientIdRequest>(
            "recipientDelete",
            "Delete recipient",
            "Delete a recipient by recipientId.",
        )
        .delete("/v1/recipients/{recipientId}"),
    ]
}

fn installment_plan_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::for_input::<InstallmentPlanCreateRequest>(
            "installmentPlanCreate",
            "Create installment plan",
            "Create an installment plan offering card installments with per-option rates. account_id defaults to the configured account.",
        )
        .post("/v1/installments-plans")
        .account_default()
        .idempotent(),
        ToolDescriptor::for_input::<InstallmentPlanIdRequest>(
            "installmentPlanRetrieve",
            "Retrieve installment plan",
            "Retrieve an installment plan by installmentPlanId.",
        )
        .get("/v1/installments-plans/{installmentPlanId}"),
        ToolDescriptor::for_input::<InstallmentPlanListRequest>(
            "installmentPlanRetrieveAll",
            "List installment plans",
            "List every installment plan of an account. account_id defaults to the configured account.",
        )
        .get("/v1/installments-plans")
        .query(&["account_id"])
        .account_default(),
        ToolDescriptor::for_input::<InstallmentPlanUpdateRequest>(
            "installmentPlanUpdate",
            "Update installment plan",
            "Update an installment plan. Only the supplied fields change.",
        )
        .patch("/v1/installments-plans/{installmentPlanId}"),
        ToolDescriptor::for_input::<InstallmentPlanIdRequest>(
            "installmentPlanDelete",
            "Delete installment plan",
            "Delete an installment plan by installmentPlanId.",
        )
        .delete("/v1/installments-plans/{installmentPlanId}"),
    ]
}

fn routing_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::for_input::<RoutingLoginRequest>(
            "routingLogin",
            "Routing login",
            "Open a dashboard session for the routing API. Returns a token required by every other routing tool.",
        )
        .post("/v1/routing/login"),
        ToolDescriptor::for_input::<RoutingCreateRequest>(
            "routingCreate",
            "Create routing workflow",
            "Create a draft routing workflow for a payment method type. Publish it with routingPost.",
        )
        .post("/v1/routing/workflows")
        .bearer("token"),
        ToolDescriptor::for_input::<RoutingProvidersRequest>(
            "routingGetProviders",
            "List routing providers",
            "List the providers connected for a payment method type, optionally filtered by country.",
        )
        .get("/v1/routing/providers")
        .query(&["payment_method_type", "country"])
        .bearer("token"),
        ToolDescriptor::for_input::<RoutingWorkflowRequest>(
            "routingRetrieve",
            "Retrieve routing workflow",
            "Retrieve a routing workflow and its versions by workflowCode.",
        )
        .get("/v1/routing/workflows/{workflowCode}")
        .bearer("token"),
        ToolDescriptor::for_input::<RoutingUpdateRequest>(
            "routingUpdate",
            "Update routing workflow",
            "Update the draft version of a routing workflow.",
        )
        .patch("/v1/routing/workflows/{workflowCode}")
        .bearer("token"),
        ToolDescriptor::for_input::<RoutingWorkflowRequest>(
            "routingPost",
            "Publish routing workflow",
            "Publish the draft version of a routing workflow so it starts routing live traffic.",
        )
        .post("/v1/routing/workflows/{workflowCode}/publish")
        .bearer("token"),
        ToolDescriptor::for_input::<RoutingSessionRequest>(
            "routingLogOut",
            "Routing logout",
            "Close a routing dashboard session.",
        )
        .post("/v1/routing/logout")
        .bearer("token"),
    ]
}
