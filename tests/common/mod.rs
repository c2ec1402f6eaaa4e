//! Common test utilities

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use formgate::config::{Config, FormsConfig, SmtpConfig, TransportConfig};
use formgate::dispatch::MailDispatcher;
use formgate::domain::{OutboundMessage, SendReceipt};
use formgate::server::{build_router, AppState};
use formgate::transport::{MailTransport, TransportError};

pub const BOUNDARY: &str = "X-FORMGATE-TEST-BOUNDARY";

/// Transport stub recording every message it is asked to send
pub struct RecordingTransport {
    pub sent: Mutex<Vec<OutboundMessage>>,
    fail_with: Option<String>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_with: None,
        })
    }

    /// A transport whose every send fails with the given diagnostic
    pub fn failing(diagnostic: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(diagnostic.to_string()),
        })
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<SendReceipt, TransportError> {
        if let Some(diagnostic) = &self.fail_with {
            return Err(TransportError::SendFailed(diagnostic.clone()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(SendReceipt {
            message_id: Some("test-msg-1".to_string()),
        })
    }

    fn supports_attachments(&self) -> bool {
        true
    }

    fn transport_name(&self) -> &'static str {
        "recording"
    }
}

/// Create a test config backed by a throwaway SMTP transport entry
pub fn test_config() -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 8080,
        send_timeout_secs: 5,
        forms: FormsConfig {
            site_name: "Eversure".to_string(),
            from_email: "forms@example.com".to_string(),
            career_enabled: true,
            career_recipient_email: "hr@example.com".to_string(),
            career_recipient_name: "HR".to_string(),
            contact_recipient_email: "info@example.com".to_string(),
            contact_recipient_name: "Reception".to_string(),
        },
        transport: TransportConfig::Smtp(SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "forms@example.com".to_string(),
            password: "password".to_string(),
        }),
    }
}

/// Build the production router over an injected transport
pub fn build_test_router(transport: Arc<dyn MailTransport>, config: Config) -> Router {
    let dispatcher = MailDispatcher::new(transport, config.forms.clone())
        .expect("dispatcher construction must succeed for test config");

    build_router(AppState {
        config: Arc::new(config),
        dispatcher: Arc::new(dispatcher),
    })
}

/// POST a JSON body and return status + parsed response body
pub async fn post_json(
    router: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(router, request).await
}

/// POST a multipart body and return status + parsed response body
pub async fn post_multipart(
    router: &Router,
    path: &str,
    body: Vec<u8>,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    send(router, request).await
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, body)
}

/// Assemble a multipart/form-data body from text fields and an optional file
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((filename, content_type, data)) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"resume\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// The standard valid career field set
pub fn career_fields<'a>() -> Vec<(&'a str, &'a str)> {
    vec![
        ("firstName", "Jane"),
        ("lastName", "Doe"),
        ("post", "QA Engineer"),
        ("email", "jane@example.com"),
        ("contactNo", "+91-9999999999"),
        ("address", "Pune, India"),
    ]
}

/// The standard valid contact payload
pub fn contact_payload() -> serde_json::Value {
    serde_json::json!({
        "name": "Jane Doe",
        "contact": "jane@example.com | Phone: +91-9999999999",
        "subject": "Product Inquiry",
        "body": "Please send a quote."
    })
}
