//! Integration tests for submitting the contact form against a mock backend

use assert_matches::assert_matches;
use contact_core::api::transport::{ContactTransport, HttpTransport};
use contact_core::effects::burst::PARTICLE_COUNT;
use contact_core::status::SUCCESS_MESSAGE;
use contact_core::utils::error::{GENERIC_FAILURE, SUBMIT_FAILED};
use contact_core::{
    ContactWidget, FastRandSource, FormField, FormValues, SubmissionError, SubmissionStatus,
    WidgetConfig,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn widget_for(server: &MockServer) -> ContactWidget {
    ContactWidget::new(WidgetConfig::default().with_base_url(server.uri()))
        .with_random_source(FastRandSource::with_seed(11))
}

fn fill(widget: &mut ContactWidget, email: &str, subject: &str, message: &str) {
    widget.set_field(FormField::Email, email);
    widget.set_field(FormField::Subject, subject);
    widget.set_field(FormField::Message, message);
}

#[tokio::test]
async fn test_end_to_end_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "email": "a@b.com",
            "subject": "Hi",
            "message": "Test"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = widget_for(&server);
    fill(&mut widget, "a@b.com", "Hi", "Test");

    assert!(widget.submit());
    assert_eq!(widget.status(), &SubmissionStatus::Loading("Sending...".to_string()));
    assert_eq!(widget.particles().len(), PARTICLE_COUNT);

    widget.settle().await;

    assert_eq!(
        widget.status(),
        &SubmissionStatus::Success(SUCCESS_MESSAGE.to_string())
    );
    assert_eq!(widget.values(), &FormValues::default());
}

#[tokio::test]
async fn test_server_detail_becomes_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "bad email"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = widget_for(&server);
    fill(&mut widget, "not-an-email", "Hi", "Test");
    widget.submit();
    widget.settle().await;

    assert_eq!(widget.status(), &SubmissionStatus::Error("bad email".to_string()));
    // Fields survive a failed attempt
    assert_eq!(widget.field(FormField::Email), "not-an-email");
}

#[tokio::test]
async fn test_missing_detail_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let mut widget = widget_for(&server);
    widget.submit();
    widget.settle().await;

    assert_matches!(widget.status(), SubmissionStatus::Error(msg) if msg == SUBMIT_FAILED);
}

#[tokio::test]
async fn test_non_json_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&WidgetConfig::default().with_base_url(server.uri()));
    let result = transport.send(&FormValues::new("a@b.com", "Hi", "Test")).await;
    assert_matches!(result, Err(SubmissionError::Parse(_)));

    let mut widget = widget_for(&server);
    widget.submit();
    widget.settle().await;
    assert_matches!(widget.status(), SubmissionStatus::Error(msg) if !msg.is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    // Nothing listens on port 1
    let uri = "http://127.0.0.1:1".to_string();

    let transport = HttpTransport::new(&WidgetConfig::default().with_base_url(uri.clone()));
    let result = transport.send(&FormValues::default()).await;
    assert_matches!(result, Err(SubmissionError::Network(_)));

    let mut widget = ContactWidget::new(WidgetConfig::default().with_base_url(uri));
    widget.submit();
    widget.settle().await;
    assert_matches!(widget.status(), SubmissionStatus::Error(msg) if !msg.is_empty() && msg != GENERIC_FAILURE);
    assert!(!widget.submit_disabled());
}

#[tokio::test]
async fn test_same_origin_base_without_host_fails_cleanly() {
    let mut widget = ContactWidget::new(WidgetConfig::default());
    assert_eq!(widget.config().endpoint(), "/api/contact");

    widget.submit();
    widget.settle().await;
    assert_matches!(widget.status(), SubmissionStatus::Error(_));
}

#[tokio::test]
async fn test_duplicate_submit_sends_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = widget_for(&server);
    fill(&mut widget, "a@b.com", "Hi", "Test");

    assert!(widget.submit());
    let key = widget.burst_key();
    assert!(!widget.submit());
    assert!(!widget.submit());
    assert_eq!(widget.burst_key(), key);

    widget.settle().await;
    assert_matches!(widget.status(), SubmissionStatus::Success(_));
}

#[tokio::test]
async fn test_resubmit_after_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "try later"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut widget = widget_for(&server);
    fill(&mut widget, "a@b.com", "Hi", "Test");

    widget.submit();
    widget.settle().await;
    assert_eq!(widget.status(), &SubmissionStatus::Error("try later".to_string()));
    let first_key = widget.burst_key();

    assert!(widget.submit());
    assert!(widget.burst_key() > first_key);
    widget.settle().await;
    assert_matches!(widget.status(), SubmissionStatus::Success(_));
    assert!(widget.values().is_empty());
}
