use reqwest::{Method, StatusCode};

use serde_json::{json, Value};

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{valid_booking, TestApp, CUSTOMER_ADDRESS, OWNER_ADDRESS};

#[tokio::test]
async fn valid_submission_notifies_both_recipients() {
    let app = TestApp::spawn().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let res = app
        .booking_create(&valid_booking())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    let body: Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(json!(true), body["ok"]);
    assert_eq!(json!("sent"), body["results"]["owner"]);
    assert_eq!(json!("sent"), body["results"]["customer"]);
    assert_eq!(json!("Both emails sent"), body["message"]);
}

#[tokio::test]
async fn owner_notification_encodes_type_and_period_in_subject() {
    let app = TestApp::spawn().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let _res = app
        .booking_create(&valid_booking())
        .await
        .expect("Failed to execute request");

    let owner_send = app
        .sent_emails()
        .await
        .into_iter()
        .find(|body| body["to"] == json!(OWNER_ADDRESS))
        .expect("No email was sent to the owner address");

    let subject = owner_send["subject"].as_str().unwrap();
    assert!(subject.contains("2025-01-10"));
    assert!(subject.contains("2025-01-15"));
}

#[tokio::test]
async fn customer_notification_goes_to_the_submitted_address() {
    let app = TestApp::spawn().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let _res = app
        .booking_create(&valid_booking())
        .await
        .expect("Failed to execute request");

    let customer_send = app
        .sent_emails()
        .await
        .into_iter()
        .find(|body| body["to"] == json!(CUSTOMER_ADDRESS))
        .expect("No email was sent to the customer address");

    assert!(customer_send["subject"]
        .as_str()
        .unwrap()
        .contains("Received"));
    assert!(customer_send["text"]
        .as_str()
        .unwrap()
        .contains("+995500000000"));
}

#[tokio::test]
async fn missing_phone_is_rejected_without_any_send() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let mut payload = valid_booking();
    payload["contact"]
        .as_object_mut()
        .unwrap()
        .remove("phone");

    let res = app
        .booking_create(&payload)
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let body: Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(json!(false), body["ok"]);
    let errors = body["errors"].as_array().unwrap();
    assert!(errors
        .iter()
        .any(|error| error.as_str().unwrap().contains("contact.phone")));
}

#[tokio::test]
async fn every_violation_is_reported_together() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let res = app
        .booking_create(&json!({ "type": "rental" }))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let body: Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(4, body["errors"].as_array().unwrap().len());
}

#[tokio::test]
async fn unparseable_body_is_rejected_as_invalid_json() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let res = app
        .booking_create_raw("{not json")
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let body: Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(json!(false), body["ok"]);
    assert_eq!(json!("Invalid JSON"), body["error"]);
}

#[tokio::test]
async fn customer_failure_still_reports_success() {
    let app = TestApp::spawn().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(body_partial_json(json!({ "to": OWNER_ADDRESS })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(body_partial_json(json!({ "to": CUSTOMER_ADDRESS })))
        .respond_with(ResponseTemplate::new(500).set_body_string("mailbox unavailable"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app
        .booking_create(&valid_booking())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    let body: Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(json!(true), body["ok"]);
    assert_eq!(json!("sent"), body["results"]["owner"]);
    let customer = body["results"]["customer"].as_str().unwrap();
    assert!(customer.starts_with("error:"));
    assert!(customer.contains("mailbox unavailable"));
    assert_eq!(
        json!("Owner email sent, but customer email failed"),
        body["message"]
    );
}

#[tokio::test]
async fn owner_failure_fails_the_request() {
    let app = TestApp::spawn().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(body_partial_json(json!({ "to": OWNER_ADDRESS })))
        .respond_with(ResponseTemplate::new(500).set_body_string("provider exploded"))
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(body_partial_json(json!({ "to": CUSTOMER_ADDRESS })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app
        .booking_create(&valid_booking())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());

    let body: Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(json!(false), body["ok"]);
    assert_eq!(json!("Failed to send emails"), body["error"]);
    let owner = body["results"]["owner"].as_str().unwrap();
    assert!(owner.starts_with("error:"));
    assert!(owner.contains("provider exploded"));
    assert_eq!(json!("sent"), body["results"]["customer"]);
}

#[tokio::test]
async fn full_delivery_failure_fails_the_request() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let res = app
        .booking_create(&valid_booking())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());

    let body: Value = res.json().await.expect("Failed to parse response body");
    assert_eq!(json!(false), body["ok"]);
    assert!(body["results"]["owner"]
        .as_str()
        .unwrap()
        .starts_with("error:"));
    assert!(body["results"]["customer"]
        .as_str()
        .unwrap()
        .starts_with("error:"));
}

#[tokio::test]
async fn root_path_also_accepts_submissions() {
    let app = TestApp::spawn().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let res = app
        .request(Method::POST, "")
        .json(&valid_booking())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::POST, "api/other")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, res.status());
    assert_eq!("Not found", res.text().await.unwrap());
}

#[tokio::test]
async fn non_post_method_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::GET, "api/booking")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::METHOD_NOT_ALLOWED, res.status());
    assert_eq!("Method not allowed", res.text().await.unwrap());
}

#[tokio::test]
async fn preflight_succeeds_on_any_path() {
    let app = TestApp::spawn().await;

    for url in ["api/booking", "", "some/other/path"] {
        let res = app
            .request(Method::OPTIONS, url)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(StatusCode::NO_CONTENT, res.status());
        assert_eq!(
            Some("*"),
            res.headers()
                .get("access-control-allow-origin")
                .and_then(|value| value.to_str().ok())
        );
    }
}

#[tokio::test]
async fn every_response_carries_cors_headers() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let success = app
        .booking_create(&valid_booking())
        .await
        .expect("Failed to execute request");
    let rejected = app
        .booking_create_raw("{not json")
        .await
        .expect("Failed to execute request");
    let not_found = app
        .request(Method::GET, "nope")
        .send()
        .await
        .expect("Failed to execute request");

    for res in [success, rejected, not_found] {
        assert_eq!(
            Some("*"),
            res.headers()
                .get("access-control-allow-origin")
                .and_then(|value| value.to_str().ok())
        );
        assert_eq!(
            Some("POST, OPTIONS"),
            res.headers()
                .get("access-control-allow-methods")
                .and_then(|value| value.to_str().ok())
        );
    }
}
