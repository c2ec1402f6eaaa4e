//! Router-level tests for the form endpoints.
//!
//! These use the production router with an injected recording transport; no
//! real mail is involved.

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use pretty_assertions::assert_eq;

use common::{
    build_test_router, career_fields, contact_payload, multipart_body, post_json,
    post_multipart, send, test_config, RecordingTransport,
};

const FIVE_MIB: usize = 5 * 1024 * 1024;

#[tokio::test]
async fn test_contact_submission_is_relayed() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport.clone(), test_config());

    let (status, body) = post_json(&router, "/api/v1/forms/contact", contact_payload()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Email sent successfully");

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Product Inquiry");
    assert_eq!(sent[0].to.email, "info@example.com");
    assert_eq!(
        sent[0].reply_to.as_ref().unwrap().email,
        "jane@example.com"
    );
}

#[tokio::test]
async fn test_contact_missing_field_yields_field_error() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport.clone(), test_config());

    let mut payload = contact_payload();
    payload.as_object_mut().unwrap().remove("subject");

    let (status, body) = post_json(&router, "/api/v1/forms/contact", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"]["subject"], "Subject is required");
    assert_eq!(transport.sent_count(), 0);
}

#[tokio::test]
async fn test_contact_malformed_json_is_bad_request() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport, test_config());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/forms/contact")
        .header("content-type", "application/json")
        .body(Body::from("this is not json"))
        .unwrap();

    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_career_submission_with_attachment_is_relayed() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport.clone(), test_config());

    let pdf = vec![b'a'; 2 * 1024 * 1024];
    let body = multipart_body(&career_fields(), Some(("resume.pdf", "application/pdf", &pdf)));

    let (status, response) = post_multipart(&router, "/api/v1/forms/career", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true);

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let message = &sent[0];
    assert_eq!(
        message.subject,
        "New Career Application: QA Engineer - Jane Doe"
    );
    assert!(message.html_body.is_some());

    let attachment = message.attachment.as_ref().unwrap();
    assert_eq!(attachment.filename, "resume.pdf");
    assert_eq!(attachment.content_type, "application/pdf");
    assert_eq!(attachment.data.len(), 2 * 1024 * 1024);
}

#[tokio::test]
async fn test_career_submission_without_resume_is_accepted() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport.clone(), test_config());

    let body = multipart_body(&career_fields(), None);
    let (status, _) = post_multipart(&router, "/api/v1/forms/career", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(transport.sent.lock().unwrap()[0].attachment.is_none());
}

#[tokio::test]
async fn test_career_png_resume_is_rejected() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport.clone(), test_config());

    let body = multipart_body(&career_fields(), Some(("pic.png", "image/png", &[0u8; 64])));
    let (status, response) = post_multipart(&router, "/api/v1/forms/career", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["errors"]["resume"],
        "Please upload a PDF or Word document"
    );
    assert_eq!(transport.sent_count(), 0);
}

#[tokio::test]
async fn test_career_resume_size_boundary() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport.clone(), test_config());

    // Exactly 5 MiB is accepted
    let at_limit = vec![b'a'; FIVE_MIB];
    let body = multipart_body(
        &career_fields(),
        Some(("resume.pdf", "application/pdf", &at_limit)),
    );
    let (status, _) = post_multipart(&router, "/api/v1/forms/career", body).await;
    assert_eq!(status, StatusCode::OK);

    // One byte over is rejected
    let over_limit = vec![b'a'; FIVE_MIB + 1];
    let body = multipart_body(
        &career_fields(),
        Some(("resume.pdf", "application/pdf", &over_limit)),
    );
    let (status, response) = post_multipart(&router, "/api/v1/forms/career", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["errors"]["resume"],
        "File size must be less than 5 MB"
    );

    assert_eq!(transport.sent_count(), 1);
}

#[tokio::test]
async fn test_career_missing_fields_are_all_reported() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport, test_config());

    let body = multipart_body(&[("firstName", "Jane")], None);
    let (status, response) = post_multipart(&router, "/api/v1/forms/career", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["lastName", "post", "email", "contactNo", "address"] {
        assert!(
            response["errors"][field].is_string(),
            "expected error for {}",
            field
        );
    }
}

#[tokio::test]
async fn test_wrong_method_is_405_json() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport, test_config());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/forms/contact")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Method not allowed");
}

#[tokio::test]
async fn test_cors_preflight_is_answered() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport, test_config());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/forms/contact")
        .header("origin", "https://www.example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_responses_carry_cors_headers() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport, test_config());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/forms/contact")
        .header("origin", "https://www.example.com")
        .header("content-type", "application/json")
        .body(Body::from(contact_payload().to_string()))
        .unwrap();

    let response = tower::ServiceExt::oneshot(router.clone(), request)
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/json"));
}

#[tokio::test]
async fn test_transport_failure_is_generic_500() {
    let transport = RecordingTransport::failing("535 5.7.8 authentication rejected for hr@");
    let router = build_test_router(transport, test_config());

    let (status, body) = post_json(&router, "/api/v1/forms/contact", contact_payload()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);

    // The upstream diagnostic must never reach the caller
    let rendered = body.to_string();
    assert!(!rendered.contains("535"));
    assert!(!rendered.contains("hr@"));
}

#[tokio::test]
async fn test_disabled_career_flow_is_a_configuration_failure() {
    let transport = RecordingTransport::new();
    let mut config = test_config();
    config.forms.career_enabled = false;
    let router = build_test_router(transport.clone(), config);

    let body = multipart_body(&career_fields(), None);
    let (status, response) = post_multipart(&router, "/api/v1/forms/career", body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response["success"], false);
    assert_eq!(transport.sent_count(), 0);
}

#[tokio::test]
async fn test_resubmitting_identical_payload_sends_twice() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport.clone(), test_config());

    for _ in 0..2 {
        let (status, _) =
            post_json(&router, "/api/v1/forms/contact", contact_payload()).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(transport.sent_count(), 2);
}

#[tokio::test]
async fn test_health_endpoint() {
    let transport = RecordingTransport::new();
    let router = build_test_router(transport, test_config());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
