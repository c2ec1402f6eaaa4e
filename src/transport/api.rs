//! Provider REST mail API transport
//!
//! Two-step protocol per send: exchange the long-lived refresh token for a
//! short-lived access token, then POST the message to the account's send
//! endpoint bearing that token. The access token is deliberately not cached
//! across sends; each request is self-contained.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{MailTransport, TransportError};
use crate::config::MailApiConfig;
use crate::domain::{OutboundMessage, SendReceipt};

/// Mail transport backed by a provider's REST API
pub struct HttpApiTransport {
    http_client: Client,
    config: MailApiConfig,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl HttpApiTransport {
    /// Create a new API transport from configuration
    pub fn from_config(config: &MailApiConfig, timeout: Duration) -> Result<Self, TransportError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Exchange the refresh token for an access token.
    ///
    /// Any non-200 status or malformed body is fatal for this send attempt;
    /// there is no retry.
    async fn exchange_token(&self) -> Result<String, TransportError> {
        let params = [
            ("refresh_token", self.config.refresh_token.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                TransportError::ConnectionError(format!("Token endpoint unreachable: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::AuthenticationFailed(format!(
                "Token endpoint returned {} - {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            TransportError::AuthenticationFailed(format!("Malformed token response: {}", e))
        })?;

        Ok(token.access_token)
    }

    fn send_url(&self) -> String {
        format!(
            "{}/accounts/{}/messages",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.account_id
        )
    }
}

#[async_trait]
impl MailTransport for HttpApiTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<SendReceipt, TransportError> {
        if message.attachment.is_some() {
            // Unreachable under a validated configuration; kept as a guard
            // against future wiring mistakes.
            return Err(TransportError::InvalidConfiguration(
                "The mail API transport cannot send attachments".to_string(),
            ));
        }

        let access_token = self.exchange_token().await?;

        let mut payload = json!({
            "fromAddress": message.from.display(),
            "toAddress": message.to.display(),
            "subject": message.subject,
            "content": message.text_body,
            "askReceipt": "no",
        });
        if let Some(reply_to) = &message.reply_to {
            payload["replyTo"] = json!(reply_to.email);
        }

        let response = self
            .http_client
            .post(self.send_url())
            .bearer_auth(&access_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                TransportError::ConnectionError(format!("Mail API unreachable: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::SendFailed(format!(
                "Mail API returned {} - {}",
                status, body
            )));
        }

        Ok(SendReceipt { message_id: None })
    }

    fn supports_attachments(&self) -> bool {
        false
    }

    fn transport_name(&self) -> &'static str {
        "api"
    }
}
