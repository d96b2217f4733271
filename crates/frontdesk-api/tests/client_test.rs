#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use frontdesk_api::{ApiClient, Error, FALLBACK_MESSAGE};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn secret(s: &str) -> secrecy::SecretString {
    s.to_string().into()
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_sign_in_success() {
    let (server, client) = setup().await;

    let envelope = json!({
        "data": {
            "_id": "u1",
            "email": "admin@acme.test",
            "firstName": "Ada",
            "role": "admin",
            "companyId": "c1",
            "isMfaEnabled": true
        },
        "message": "ok",
        "isError": false,
        "responseCode": 200
    });

    Mock::given(method("POST"))
        .and(path("/users/signin"))
        .and(body_partial_json(json!({ "email": "admin@acme.test" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let user = client
        .sign_in("admin@acme.test", &secret("hunter2!"))
        .await
        .unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.role.as_deref(), Some("admin"));
    assert_eq!(user.company_id.as_deref(), Some("c1"));
    assert!(user.is_mfa_enabled);
}

#[tokio::test]
async fn test_sign_in_bad_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/users/signin"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let result = client.sign_in("admin@acme.test", &secret("wrong")).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_forgot_password_flow() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/users/forgot-password"))
        .and(body_partial_json(json!({ "email": "ada@acme.test" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null, "message": "sent", "isError": false, "responseCode": 200
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/users/verify-forgot-pass-token"))
        .and(body_partial_json(json!({ "token": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null, "message": "verified", "isError": false, "responseCode": 200
        })))
        .mount(&server)
        .await;

    client.forgot_password("ada@acme.test").await.unwrap();
    client
        .verify_forgot_pass_token("ada@acme.test", "123456")
        .await
        .unwrap();
}

// ── Envelope handling tests ─────────────────────────────────────────

#[tokio::test]
async fn test_bare_payload_fallback() {
    let (server, client) = setup().await;

    // Some endpoints skip the envelope entirely and return a bare array.
    let bare = json!([
        { "_id": "v1", "email": "guest@visitors.test", "firstName": "Grace" }
    ]);

    Mock::given(method("GET"))
        .and(path("/visitor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&bare))
        .mount(&server)
        .await;

    let visitors = client.list_visitors(None).await.unwrap();

    assert_eq!(visitors.len(), 1);
    assert_eq!(visitors[0].id, "v1");
    assert_eq!(visitors[0].first_name.as_deref(), Some("Grace"));
}

#[tokio::test]
async fn test_is_error_envelope_inside_http_200() {
    let (server, client) = setup().await;

    let envelope = json!({
        "data": null,
        "message": "Plan limit reached",
        "isError": true,
        "responseCode": 422
    });

    Mock::given(method("GET"))
        .and(path("/employee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let result = client.list_employees().await;

    match result {
        Err(Error::Api {
            ref message,
            status,
        }) => {
            assert_eq!(message, "Plan limit reached");
            assert_eq!(status, Some(422));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_message_uses_fallback() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/invoice"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let err = client.list_invoices().await.unwrap_err();

    assert_eq!(err.user_message(), FALLBACK_MESSAGE);
}

// ── Visitor / visit tests ───────────────────────────────────────────

#[tokio::test]
async fn test_list_visitors_with_filter() {
    let (server, client) = setup().await;

    let envelope = json!({
        "data": [
            { "_id": "v2", "email": "grace@visitors.test", "firstName": "Grace" }
        ],
        "message": "ok",
        "isError": false,
        "responseCode": 200
    });

    Mock::given(method("GET"))
        .and(path("/visitor"))
        .and(query_param("search", "grace"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let visitors = client.list_visitors(Some("grace")).await.unwrap();

    assert_eq!(visitors.len(), 1);
    assert_eq!(visitors[0].id, "v2");
}

#[tokio::test]
async fn test_check_out_visit() {
    let (server, client) = setup().await;

    let envelope = json!({
        "data": {
            "_id": "visit9",
            "visitorId": "v1",
            "checkIn": "2026-02-10T09:00:00Z",
            "checkOut": "2026-02-10T17:30:00Z"
        },
        "message": "ok",
        "isError": false,
        "responseCode": 200
    });

    Mock::given(method("PATCH"))
        .and(path("/visits/checkout/visit9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let visit = client.check_out_visit("visit9").await.unwrap();

    assert_eq!(visit.id, "visit9");
    assert_eq!(visit.check_out.as_deref(), Some("2026-02-10T17:30:00Z"));
}

// ── Billing tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_create_payment_intent() {
    let (server, client) = setup().await;

    let envelope = json!({
        "data": {
            "id": "pi_123",
            "clientSecret": "pi_123_secret_abc",
            "amount": 4900,
            "currency": "usd"
        },
        "message": "ok",
        "isError": false,
        "responseCode": 200
    });

    Mock::given(method("POST"))
        .and(path("/subscription/create-payment-intent"))
        .and(body_partial_json(json!({ "planId": "plan1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let intent = client
        .create_payment_intent(&frontdesk_api::models::CreatePaymentIntentRequest {
            plan_id: "plan1".into(),
            discount_code: Some("WELCOME10".into()),
        })
        .await
        .unwrap();

    assert_eq!(intent.id, "pi_123");
    assert_eq!(intent.client_secret, "pi_123_secret_abc");
    assert_eq!(intent.amount, Some(4900));
}

#[tokio::test]
async fn test_list_features_by_tier() {
    let (server, client) = setup().await;

    let envelope = json!({
        "data": [
            { "_id": "f1", "name": "Visitor badges", "type": "premium" }
        ],
        "message": "ok",
        "isError": false,
        "responseCode": 200
    });

    Mock::given(method("GET"))
        .and(path("/feature/premium"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let features = client
        .list_features(frontdesk_api::models::FeatureType::Premium)
        .await
        .unwrap();

    assert_eq!(features.len(), 1);
    assert_eq!(features[0].feature_type.as_deref(), Some("premium"));
}
