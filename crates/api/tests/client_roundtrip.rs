use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, Method as AxumMethod, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use payline_api::{ApiError, ApiRequest, Credentials, PaylineClient, PaymentApi};
use reqwest::Method;
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct CapturedRequest {
    method: String,
    uri: Uri,
    headers: HeaderMap,
    body: String,
}

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Captured {
    fn take(&self) -> Vec<CapturedRequest> {
        std::mem::take(&mut *self.requests.lock().expect("lock captured requests"))
    }
}

async fn record(State(state): State<Captured>, method: AxumMethod, uri: Uri, headers: HeaderMap, body: String) -> Response {
    state.requests.lock().expect("lock captured requests").push(CapturedRequest {
        method: method.to_string(),
        uri: uri.clone(),
        headers,
        body,
    });

    match uri.path() {
        "/v1/fail" => (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"message": "bad amount"}))).into_response(),
        "/v1/empty" => StatusCode::NO_CONTENT.into_response(),
        path if path.ends_with(".md") => (StatusCode::OK, "# Payments\n\nCreate a payment.").into_response(),
        _ => (StatusCode::CREATED, [("x-request-id", "req-1")], Json(json!({"id": "pay_123"}))).into_response(),
    }
}

async fn spawn_stub() -> (String, Captured) {
    let captured = Captured::default();
    let app = Router::new().fallback(record).with_state(captured.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub listener");
    let address = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{}", address), captured)
}

fn client(base_url: &str) -> PaylineClient {
    let credentials = Credentials {
        account_code: "acct-0001".into(),
        public_api_key: "sandbox_pk_123".into(),
        private_secret_key: "sk_test_456".into(),
    };
    PaylineClient::new(credentials, Some(base_url)).expect("client")
}

#[tokio::test]
async fn execute_sends_credentials_idempotency_key_and_json_body() {
    let (base_url, captured) = spawn_stub().await;
    let client = client(&base_url);

    let mut request = ApiRequest::new(Method::POST, "/v1/payments").with_body(json!({"description": "order"}));
    request.idempotency_key = Some("idem-1".into());
    request.query = vec![("merchant_order_id".into(), "order 1".into())];
    let response = client.execute(request).await.expect("execute");

    assert_eq!(response.status, 201);
    assert_eq!(response.body, json!({"id": "pay_123"}));
    assert_eq!(response.headers.get("x-request-id").map(String::as_str), Some("req-1"));

    let seen = captured.take();
    assert_eq!(seen.len(), 1);
    let request = &seen[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.uri.path(), "/v1/payments");
    assert_eq!(request.uri.query(), Some("merchant_order_id=order+1"));
    assert_eq!(request.headers["public-api-key"], "sandbox_pk_123");
    assert_eq!(request.headers["private-secret-key"], "sk_test_456");
    assert_eq!(request.headers["x-idempotency-key"], "idem-1");
    assert_eq!(request.headers["accept"], "application/json");
    assert!(
        request.headers["user-agent"]
            .to_str()
            .expect("user agent")
            .starts_with("payline-mcp/")
    );
    let body: Value = serde_json::from_str(&request.body).expect("json body");
    assert_eq!(body, json!({"description": "order"}));
}

#[tokio::test]
async fn bearer_token_is_sent_as_authorization_header() {
    let (base_url, captured) = spawn_stub().await;
    let mut request = ApiRequest::get("/v1/routing/providers");
    request.bearer_token = Some("session-token".into());
    client(&base_url).execute(request).await.expect("execute");

    let seen = captured.take();
    assert_eq!(seen[0].headers["authorization"], "Bearer session-token");
    assert!(seen[0].body.is_empty());
}

#[tokio::test]
async fn non_success_status_becomes_status_error() {
    let (base_url, _captured) = spawn_stub().await;
    let error = client(&base_url)
        .execute(ApiRequest::new(Method::POST, "/v1/fail").with_body(json!({})))
        .await
        .expect_err("422 is an error");
    match error {
        ApiError::Status { status, message, body } => {
            assert_eq!(status, 422);
            assert_eq!(message, "bad amount");
            assert_eq!(body, json!({"message": "bad amount"}));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let (base_url, _captured) = spawn_stub().await;
    let response = client(&base_url)
        .execute(ApiRequest::new(Method::DELETE, "/v1/empty"))
        .await
        .expect("execute");
    assert_eq!(response.status, 204);
    assert_eq!(response.body, Value::Null);
}

#[tokio::test]
async fn documentation_fetch_returns_text_without_credentials() {
    let (base_url, captured) = spawn_stub().await;
    let text = client(&base_url)
        .fetch_document(&format!("{}/reference/payments.md", base_url))
        .await
        .expect("document");
    assert!(text.starts_with("# Payments"));

    let seen = captured.take();
    assert!(!seen[0].headers.contains_key("private-secret-key"));
    assert!(!seen[0].headers.contains_key("public-api-key"));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("address");
    drop(listener);

    let error = client(&format!("http://{}", address))
        .execute(ApiRequest::get("/v1/payments/pay_1"))
        .await
        .expect_err("connection refused");
    assert!(matches!(error, ApiError::Transport(_)));
}
