#![allow(clippy::unwrap_used)]
// End-to-end tests for `Portal` against a wiremock backend.
//
// These exercise the slice contract: loading-flag lifecycle, replacement
// and point-patch mutation semantics, rejection leaving snapshots
// untouched, persisted-session restore, and the latest-dispatch-wins
// behavior of concurrent same-field fetches.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use frontdesk_core::action::{Action, CreateEmployeeRequest, CreatePaymentIntentRequest};
use frontdesk_core::{Portal, PortalConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, tempfile::TempDir, Portal) {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let portal = portal_at(&server, &dir).await;
    (server, dir, portal)
}

async fn portal_at(server: &MockServer, dir: &tempfile::TempDir) -> Portal {
    let mut config = PortalConfig::new(Url::parse(&server.uri()).unwrap());
    config.session_cache = Some(dir.path().join("session.json"));

    let portal = Portal::new(config).unwrap();
    portal.open().await.unwrap();
    portal
}

fn secret(s: &str) -> secrecy::SecretString {
    s.to_string().into()
}

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "data": data, "message": "ok", "isError": false, "responseCode": 200 })
}

async fn mount_sign_in(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/users/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "_id": "u1",
            "email": "ada@acme.test",
            "firstName": "Ada",
            "role": "admin",
            "companyId": "c1"
        }))))
        .mount(server)
        .await;
}

async fn sign_in(portal: &Portal) {
    portal
        .dispatch(Action::SignIn {
            email: "ada@acme.test".into(),
            password: secret("hunter2!"),
        })
        .await
        .unwrap();
}

// ── Session lifecycle ───────────────────────────────────────────────

#[tokio::test]
async fn sign_in_populates_session_and_cache() {
    let (server, dir, portal) = setup().await;
    mount_sign_in(&server).await;

    assert!(portal.session().is_none());
    sign_in(&portal).await;

    let session = portal.session().unwrap();
    assert_eq!(session.email, "ada@acme.test");
    assert!(session.is_admin());

    // A second portal over the same cache restores the session without
    // any network traffic.
    let restored = portal_at(&server, &dir).await;
    assert_eq!(restored.session().unwrap().email, "ada@acme.test");
}

#[tokio::test]
async fn sign_out_clears_session_and_cache() {
    let (server, dir, portal) = setup().await;
    mount_sign_in(&server).await;
    sign_in(&portal).await;

    portal.dispatch(Action::SignOut).await.unwrap();

    assert!(portal.session().is_none());

    // A fresh portal over the same cache comes up unauthenticated.
    let fresh = portal_at(&server, &dir).await;
    assert!(fresh.session().is_none());
}

#[tokio::test]
async fn sign_out_resets_every_slice() {
    let (server, _dir, portal) = setup().await;
    mount_sign_in(&server).await;
    sign_in(&portal).await;

    Mock::given(method("GET"))
        .and(path("/visitor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "_id": "v1", "email": "g@x.test" }
        ]))))
        .mount(&server)
        .await;

    portal
        .dispatch(Action::FetchVisitors { filter: None })
        .await
        .unwrap();
    assert_eq!(portal.visitors_snapshot().len(), 1);

    portal.dispatch(Action::SignOut).await.unwrap();
    assert!(portal.visitors_snapshot().is_empty());
}

// ── Loading flags ───────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn loading_flag_follows_the_request_lifecycle() {
    let (server, _dir, portal) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employee"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([])))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    assert!(!portal.store().employee.fetching.get());

    let p = portal.clone();
    let handle = tokio::spawn(async move { p.dispatch(Action::FetchEmployees).await });

    // The flag flips true at dispatch, before the response lands.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(portal.store().employee.fetching.get());

    handle.await.unwrap().unwrap();
    assert!(!portal.store().employee.fetching.get());
}

#[tokio::test(flavor = "multi_thread")]
async fn loading_flag_clears_on_rejection_too() {
    let (server, _dir, portal) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employee"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "message": "boom" }))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let p = portal.clone();
    let handle = tokio::spawn(async move { p.dispatch(Action::FetchEmployees).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(portal.store().employee.fetching.get());

    assert!(handle.await.unwrap().is_err());
    assert!(!portal.store().employee.fetching.get());
}

// ── Mutation semantics ──────────────────────────────────────────────

#[tokio::test]
async fn fetch_replaces_the_snapshot_wholesale() {
    let (server, _dir, portal) = setup().await;

    let first = Mock::given(method("GET"))
        .and(path("/visitor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "_id": "v1", "email": "one@x.test" },
            { "_id": "v2", "email": "two@x.test" }
        ]))))
        .up_to_n_times(1)
        .mount_as_scoped(&server)
        .await;

    portal
        .dispatch(Action::FetchVisitors { filter: None })
        .await
        .unwrap();
    assert_eq!(portal.visitors_snapshot().len(), 2);
    drop(first);

    Mock::given(method("GET"))
        .and(path("/visitor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "_id": "v3", "email": "three@x.test" }
        ]))))
        .mount(&server)
        .await;

    portal
        .dispatch(Action::FetchVisitors { filter: None })
        .await
        .unwrap();

    let snap = portal.visitors_snapshot();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].id, "v3");
}

#[tokio::test]
async fn create_appends_to_the_snapshot() {
    let (server, _dir, portal) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "_id": "e1", "email": "old@acme.test" }
        ]))))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/employee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(
            { "_id": "e2", "email": "new@acme.test", "firstName": "Nia" }
        ))))
        .mount(&server)
        .await;

    portal.dispatch(Action::FetchEmployees).await.unwrap();
    portal
        .dispatch(Action::CreateEmployee(CreateEmployeeRequest {
            email: "new@acme.test".into(),
            first_name: "Nia".into(),
            last_name: "Okafor".into(),
            phone: None,
            department: None,
            designation: None,
        }))
        .await
        .unwrap();

    let snap = portal.employees_snapshot();
    assert_eq!(snap.len(), 2);
    assert_eq!(snap[1].id, "e2");
}

#[tokio::test]
async fn checkout_point_patches_the_matched_visit() {
    let (server, _dir, portal) = setup().await;

    Mock::given(method("GET"))
        .and(path("/visits/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {
                "_id": "visit1",
                "visitorId": "v1",
                "checkIn": "2026-02-10T09:00:00Z"
            },
            {
                "_id": "visit2",
                "visitorId": "v1"
            }
        ]))))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/visits/checkout/visit1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(
            { "_id": "visit1", "visitorId": "v1" }
        ))))
        .mount(&server)
        .await;

    portal
        .dispatch(Action::FetchVisits {
            visitor_id: "v1".into(),
        })
        .await
        .unwrap();

    portal
        .dispatch(Action::CheckOutVisit {
            visit_id: "visit1".into(),
        })
        .await
        .unwrap();

    let snap = portal.visits_snapshot();
    assert!(snap[0].check_out.is_some(), "matched visit gets stamped");
    assert!(snap[1].check_out.is_none(), "other visits untouched");
}

#[tokio::test]
async fn checkout_of_unknown_visit_is_a_silent_noop() {
    let (server, _dir, portal) = setup().await;

    Mock::given(method("GET"))
        .and(path("/visits/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "_id": "visit1", "visitorId": "v1" }
        ]))))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/visits/checkout/ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(
            { "_id": "ghost", "visitorId": "v1" }
        ))))
        .mount(&server)
        .await;

    portal
        .dispatch(Action::FetchVisits {
            visitor_id: "v1".into(),
        })
        .await
        .unwrap();
    let before = portal.visits_snapshot();

    // No throw, no partial mutation.
    portal
        .dispatch(Action::CheckOutVisit {
            visit_id: "ghost".into(),
        })
        .await
        .unwrap();

    let after = portal.visits_snapshot();
    assert_eq!(before.len(), after.len());
    assert!(after[0].check_out.is_none());
}

#[tokio::test]
async fn rejection_leaves_the_snapshot_untouched() {
    let (server, _dir, portal) = setup().await;

    let ok = Mock::given(method("GET"))
        .and(path("/employee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "_id": "e1", "email": "old@acme.test" }
        ]))))
        .up_to_n_times(1)
        .mount_as_scoped(&server)
        .await;

    portal.dispatch(Action::FetchEmployees).await.unwrap();
    drop(ok);

    Mock::given(method("GET"))
        .and(path("/employee"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "Not allowed" })),
        )
        .mount(&server)
        .await;

    let err = portal.dispatch(Action::FetchEmployees).await.unwrap_err();

    assert_eq!(err.user_message(), "Not allowed");
    let snap = portal.employees_snapshot();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].id, "e1");
}

// ── Concurrent fetches ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn latest_dispatched_fetch_wins_regardless_of_completion_order() {
    let (server, _dir, portal) = setup().await;

    // The unfiltered fetch is dispatched first but completes last.
    Mock::given(method("GET"))
        .and(path("/visitor"))
        .and(query_param_is_missing("search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([
                    { "_id": "v1", "email": "one@x.test" },
                    { "_id": "v2", "email": "two@x.test" }
                ])))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/visitor"))
        .and(query_param("search", "grace"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([
                    { "_id": "v9", "email": "grace@x.test" }
                ])))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let p1 = portal.clone();
    let slow = tokio::spawn(async move { p1.dispatch(Action::FetchVisitors { filter: None }).await });

    // Make sure the unfiltered fetch is dispatched (and ticketed) first.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let p2 = portal.clone();
    let fast = tokio::spawn(async move {
        p2.dispatch(Action::FetchVisitors {
            filter: Some("grace".into()),
        })
        .await
    });

    fast.await.unwrap().unwrap();
    slow.await.unwrap().unwrap();

    // The filtered fetch was dispatched last, so its result is final even
    // though the unfiltered response arrived after it.
    let snap = portal.visitors_snapshot();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].id, "v9");
}

// ── Checkout flow ───────────────────────────────────────────────────

#[tokio::test]
async fn payment_intent_persists_the_selected_promotion() {
    let (server, _dir, portal) = setup().await;

    Mock::given(method("POST"))
        .and(path("/subscription/create-payment-intent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(
            { "id": "pi_1", "clientSecret": "pi_1_secret", "amount": 4900 }
        ))))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/subscription/confirm-payment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(
            { "subscriptionId": "sub_1", "status": "active" }
        ))))
        .mount(&server)
        .await;

    portal
        .dispatch(Action::CreatePaymentIntent(CreatePaymentIntentRequest {
            plan_id: "plan1".into(),
            discount_code: Some("WELCOME10".into()),
        }))
        .await
        .unwrap();

    assert_eq!(portal.payment_intent().unwrap().id, "pi_1");
    let promo = portal.selected_promotion().unwrap();
    assert_eq!(promo.plan_id, "plan1");
    assert_eq!(promo.discount_code.as_deref(), Some("WELCOME10"));

    portal
        .dispatch(Action::ConfirmPayment(
            frontdesk_core::action::ConfirmPaymentRequest {
                payment_intent_id: "pi_1".into(),
                plan_id: "plan1".into(),
            },
        ))
        .await
        .unwrap();

    assert!(portal.payment_intent().is_none());
    assert!(portal.selected_promotion().is_none());
}

// ── Settings / MFA ──────────────────────────────────────────────────

#[tokio::test]
async fn settings_update_keeps_the_session_mfa_flag_in_step() {
    let (server, _dir, portal) = setup().await;
    mount_sign_in(&server).await;
    sign_in(&portal).await;

    assert!(!portal.session().unwrap().mfa_enabled);

    Mock::given(method("PUT"))
        .and(path("/user-settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(
            { "userId": "u1", "isMfaEnabled": true }
        ))))
        .mount(&server)
        .await;

    portal
        .dispatch(Action::UpdateSettings(
            frontdesk_core::action::UpdateSettingsRequest {
                is_mfa_enabled: Some(true),
                ..Default::default()
            },
        ))
        .await
        .unwrap();

    assert!(portal.settings().unwrap().mfa_enabled);
    assert!(portal.session().unwrap().mfa_enabled);
}

// ── Password reset flow ─────────────────────────────────────────────

#[tokio::test]
async fn reset_flow_tracks_the_otp_flag() {
    let (server, _dir, portal) = setup().await;

    for p in [
        "/users/forgot-password",
        "/users/verify-forgot-pass-token",
        "/users/new-password",
    ] {
        Mock::given(method("POST"))
            .and(path(p))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
            .mount(&server)
            .await;
    }

    portal
        .dispatch(Action::ForgotPassword {
            email: "ada@acme.test".into(),
        })
        .await
        .unwrap();
    assert!(!portal.otp_verified());

    portal
        .dispatch(Action::VerifyResetToken {
            email: "ada@acme.test".into(),
            token: "123456".into(),
        })
        .await
        .unwrap();
    assert!(portal.otp_verified());

    portal
        .dispatch(Action::SetNewPassword {
            email: "ada@acme.test".into(),
            token: "123456".into(),
            password: secret("n3w-p4ss!"),
        })
        .await
        .unwrap();
    assert!(!portal.otp_verified());
}
