use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Duration;
use estimator::auth::TokenVerifier;
use estimator::mailer::{EstimateMailer, MailerError, OutgoingEmail, email_templates};
use estimator::{AppState, configure_app};
use serde_json::{Value, json};

mod common;

const SECRET: &str = "route-test-secret";

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl EstimateMailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailerError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(format!("msg-{}", sent.len()))
    }
}

fn state(test_db: &common::TestDb, mailer: Arc<RecordingMailer>) -> AppState {
    AppState {
        repo: test_db.repo(),
        verifier: TokenVerifier::new(SECRET),
        mailer,
        tera: email_templates().unwrap(),
    }
}

fn bearer(sub: &str, email: &str) -> (actix_web::http::header::HeaderName, String) {
    let token = TokenVerifier::new(SECRET)
        .issue(sub, email, Some("Pat's Drywall"), Duration::hours(1))
        .unwrap();
    (AUTHORIZATION, format!("Bearer {token}"))
}

fn pdf_base64() -> String {
    STANDARD.encode(b"%PDF-1.7\n%test\n")
}

macro_rules! init_app {
    ($test_db:expr, $mailer:expr) => {
        test::init_service(App::new().configure(configure_app(state(&$test_db, $mailer)))).await
    };
}

#[actix_web::test]
async fn test_requests_without_token_are_unauthorized() {
    let test_db = common::TestDb::new("test_requests_without_token_are_unauthorized.db");
    let app = init_app!(test_db, Arc::new(RecordingMailer::default()));

    let req = test::TestRequest::post()
        .uri("/api/send-estimate")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Unauthorized");

    let req = test::TestRequest::get()
        .uri("/api/clients")
        .insert_header((AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_client_crud_is_scoped_to_caller() {
    let test_db = common::TestDb::new("test_client_crud_is_scoped_to_caller.db");
    let app = init_app!(test_db, Arc::new(RecordingMailer::default()));
    let owner = bearer("auth0|owner", "owner@example.com");
    let other = bearer("auth0|other", "other@example.com");

    let req = test::TestRequest::post()
        .uri("/api/clients")
        .insert_header(owner.clone())
        .set_json(json!({ "name": "Jane Smith", "email": "jane@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let client_id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Jane Smith");

    let req = test::TestRequest::get()
        .uri("/api/clients?search=jane")
        .insert_header(owner.clone())
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed["total"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/clients/{client_id}"))
        .insert_header(other.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&format!("/api/clients/{client_id}"))
        .insert_header(owner.clone())
        .set_json(json!({ "name": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["name"].is_array());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/clients/{client_id}"))
        .insert_header(owner.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/clients/{client_id}"))
        .insert_header(owner)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_wizard_step_validation() {
    let test_db = common::TestDb::new("test_wizard_step_validation.db");
    let app = init_app!(test_db, Arc::new(RecordingMailer::default()));
    let owner = bearer("auth0|owner", "owner@example.com");

    let req = test::TestRequest::post()
        .uri("/api/estimates/wizard/validate")
        .insert_header(owner.clone())
        .set_json(json!({ "step": "scope", "data": { "trade": "roofing" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["valid"], false);
    assert!(body["errors"]["trade"].is_array());

    let req = test::TestRequest::post()
        .uri("/api/estimates/wizard/validate")
        .insert_header(owner)
        .set_json(json!({
            "step": "scope",
            "data": { "trade": "painting", "measurements": { "wall_sqft": 400.0 } }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["valid"], true);
}

#[actix_web::test]
async fn test_calculate_and_unknown_trade_settings() {
    let test_db = common::TestDb::new("test_calculate_and_unknown_trade_settings.db");
    let app = init_app!(test_db, Arc::new(RecordingMailer::default()));
    let owner = bearer("auth0|owner", "owner@example.com");

    let req = test::TestRequest::post()
        .uri("/api/estimates/calculate")
        .insert_header(owner.clone())
        .set_json(json!({
            "trade": "drywall_hanging",
            "measurements": { "wall_sqft": 1000.0 },
            "complexity": "simple"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 1000.0);
    assert_eq!(body["low"], 900.0);
    assert_eq!(body["high"], 1100.0);

    let req = test::TestRequest::post()
        .uri("/api/estimates/calculate")
        .insert_header(owner.clone())
        .set_json(json!({
            "trade": "painting",
            "measurements": { "wall_sqft": 1e307 },
            "complexity": "simple"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "estimate amounts are too large to price");

    let req = test::TestRequest::get()
        .uri("/api/settings/pricing/roofing")
        .insert_header(owner)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_send_estimate_rejects_bad_payloads() {
    let test_db = common::TestDb::new("test_send_estimate_rejects_bad_payloads.db");
    let mailer = Arc::new(RecordingMailer::default());
    let app = init_app!(test_db, mailer.clone());
    let owner = bearer("auth0|owner", "owner@example.com");

    let cases = [
        (
            json!({ "recipient_email": "jane@example.com", "pdf_base64": pdf_base64() }),
            StatusCode::BAD_REQUEST,
            "Missing required fields",
        ),
        (
            json!({ "estimate_id": 1, "recipient_email": "jane@", "pdf_base64": pdf_base64() }),
            StatusCode::BAD_REQUEST,
            "Invalid email address",
        ),
        (
            json!({
                "estimate_id": 1,
                "recipient_email": "jane@example.com",
                "pdf_base64": STANDARD.encode(b"not a pdf")
            }),
            StatusCode::BAD_REQUEST,
            "Invalid PDF data",
        ),
        (
            json!({
                "estimate_id": 999,
                "recipient_email": "jane@example.com",
                "pdf_base64": pdf_base64()
            }),
            StatusCode::NOT_FOUND,
            "Not found",
        ),
    ];

    for (payload, status, message) in cases {
        let req = test::TestRequest::post()
            .uri("/api/send-estimate")
            .insert_header(owner.clone())
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], message);
    }

    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_send_estimate_marks_estimate_sent() {
    let test_db = common::TestDb::new("test_send_estimate_marks_estimate_sent.db");
    let mailer = Arc::new(RecordingMailer::default());
    let app = init_app!(test_db, mailer.clone());
    let owner = bearer("auth0|owner", "owner@example.com");

    let req = test::TestRequest::post()
        .uri("/api/clients")
        .insert_header(owner.clone())
        .set_json(json!({ "name": "Jane Smith", "email": "jane@example.com" }))
        .to_request();
    let client: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/estimates")
        .insert_header(owner.clone())
        .set_json(json!({
            "client_id": client["id"],
            "trade": "drywall_hanging",
            "measurements": { "wall_sqft": 1000.0 },
            "complexity": "simple",
            "title": "Basement walls"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let estimate: Value = test::read_body_json(resp).await;
    assert_eq!(estimate["status"], "draft");
    let estimate_id = estimate["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/send-estimate")
        .insert_header(owner.clone())
        .set_json(json!({
            "estimate_id": estimate_id,
            "recipient_email": "jane@example.com",
            "message": "Thanks for having us out.",
            "detail_level": "detailed",
            "pdf_base64": pdf_base64()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message_id"], "msg-1");

    {
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let email = &sent[0];
        assert_eq!(email.to, "jane@example.com");
        assert_eq!(email.to_name.as_deref(), Some("Jane Smith"));
        assert_eq!(email.reply_to.as_deref(), Some("owner@example.com"));
        assert!(email.subject.contains(estimate["number"].as_str().unwrap()));
        assert!(email.html.contains("Thanks for having us out."));
        assert_eq!(email.attachments.len(), 1);
        assert_eq!(email.attachments[0].content_type, "application/pdf");
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/estimates/{estimate_id}"))
        .insert_header(owner)
        .to_request();
    let reloaded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reloaded["status"], "sent");
    assert!(!reloaded["sent_at"].is_null());
}

macro_rules! create_wall_estimate {
    ($app:expr, $auth:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/clients")
            .insert_header($auth.clone())
            .set_json(json!({ "name": "Jane Smith" }))
            .to_request();
        let client: Value = test::call_and_read_body_json(&$app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/estimates")
            .insert_header($auth.clone())
            .set_json(json!({
                "client_id": client["id"],
                "trade": "drywall_hanging",
                "measurements": { "wall_sqft": 1000.0 },
                "complexity": "simple",
                "title": "Basement walls"
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let estimate: Value = test::read_body_json(resp).await;
        estimate
    }};
}

#[actix_web::test]
async fn test_saved_estimate_keeps_pricing_after_settings_change() {
    let test_db = common::TestDb::new("test_saved_estimate_keeps_pricing.db");
    let app = init_app!(test_db, Arc::new(RecordingMailer::default()));
    let owner = bearer("auth0|owner", "owner@example.com");

    let estimate = create_wall_estimate!(app, owner);
    let estimate_id = estimate["id"].as_i64().unwrap();
    assert_eq!(estimate["total"], 1000.0);

    let req = test::TestRequest::put()
        .uri("/api/settings/pricing/drywall_hanging")
        .insert_header(owner.clone())
        .set_json(json!({
            "rates": { "hang_wall": 2.0, "board": 1.0 },
            "range_percent": 20.0,
            "minimum_charge": 5000.0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/estimates/{estimate_id}"))
        .insert_header(owner.clone())
        .to_request();
    let reloaded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reloaded["total"], estimate["total"]);
    assert_eq!(reloaded["low"], estimate["low"]);
    assert_eq!(reloaded["high"], estimate["high"]);
    assert_eq!(reloaded["breakdown"], estimate["breakdown"]);

    // New estimates use the new settings.
    let req = test::TestRequest::post()
        .uri("/api/estimates/calculate")
        .insert_header(owner)
        .set_json(json!({
            "trade": "drywall_hanging",
            "measurements": { "wall_sqft": 1000.0 },
            "complexity": "simple"
        }))
        .to_request();
    let preview: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(preview["total"], 5000.0);
    assert_eq!(preview["minimum_applied"], true);
}

#[actix_web::test]
async fn test_out_of_range_page_is_empty() {
    let test_db = common::TestDb::new("test_out_of_range_page_is_empty.db");
    let app = init_app!(test_db, Arc::new(RecordingMailer::default()));
    let owner = bearer("auth0|owner", "owner@example.com");

    create_wall_estimate!(app, owner);

    for uri in [
        "/api/estimates?page=18446744073709551615",
        "/api/clients?page=18446744073709551615&per_page=18446744073709551615",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(owner.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["total"], 1, "{uri}");
        assert_eq!(body["items"].as_array().map(Vec::len), Some(0), "{uri}");
    }
}
