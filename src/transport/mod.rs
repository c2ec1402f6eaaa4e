//! Outbound mail transports
//!
//! A single [`MailTransport`] strategy delivers every message. Two
//! implementations exist: a direct SMTP session and a provider REST mail API
//! behind an OAuth refresh token. The transport is chosen by configuration at
//! startup and never per request.

pub mod api;
pub mod smtp;

pub use api::HttpApiTransport;
pub use smtp::SmtpTransport;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TransportConfig;
use crate::domain::{OutboundMessage, SendReceipt};

/// Mail transport error types
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Strategy for delivering a constructed message
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Perform exactly one delivery attempt
    async fn send(&self, message: &OutboundMessage) -> Result<SendReceipt, TransportError>;

    /// Whether this transport can carry file attachments
    fn supports_attachments(&self) -> bool;

    /// Get the transport name
    fn transport_name(&self) -> &'static str;
}

/// Build the configured transport.
///
/// `timeout` bounds every network call the transport makes; the upstream
/// endpoints must never be able to hang a request indefinitely.
pub fn from_config(
    config: &TransportConfig,
    timeout: Duration,
) -> Result<Arc<dyn MailTransport>, TransportError> {
    match config {
        TransportConfig::Smtp(smtp) => Ok(Arc::new(SmtpTransport::from_config(smtp, timeout)?)),
        TransportConfig::Api(api) => Ok(Arc::new(HttpApiTransport::from_config(api, timeout)?)),
    }
}
