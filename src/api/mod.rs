//! HTTP API handlers and wire-level response types

pub mod career;
pub mod contact;
pub mod health;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Body of every successful submission response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

impl SubmitResponse {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Fallback for requests hitting a form route with the wrong method
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Plain OPTIONS handler; CORS preflights are answered by the CORS layer, and
/// anything else gets an empty 200 as well
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_response_serialization() {
        let response = SubmitResponse::sent("Email sent successfully");
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"success\":true"));
        assert!(json.contains("Email sent successfully"));
    }

    #[test]
    fn test_submit_response_round_trip() {
        let json = r#"{"success":true,"message":"ok"}"#;
        let response: SubmitResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.message, "ok");
    }
}
