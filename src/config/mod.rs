//! Configuration management for Formgate
//!
//! All configuration is resolved once at process start from environment
//! variables. Credentials are never compiled into the binary.

use anyhow::{Context, Result};
use std::env;
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Timeout applied to every outbound mail call (SMTP session, token
    /// exchange, API send), in seconds
    pub send_timeout_secs: u64,
    /// Form flow settings (identities, recipients)
    pub forms: FormsConfig,
    /// The single mail transport used for every dispatch
    pub transport: TransportConfig,
}

/// Identities and per-flow recipients for the form endpoints
#[derive(Debug, Clone, Validate)]
pub struct FormsConfig {
    /// Site name used in sender display names and message footers
    pub site_name: String,
    /// Address all relayed mail is sent from
    #[validate(email)]
    pub from_email: String,
    /// Whether the career (resume upload) flow is served at all
    pub career_enabled: bool,
    /// Recipient of career applications
    #[validate(email)]
    pub career_recipient_email: String,
    pub career_recipient_name: String,
    /// Recipient of contact messages
    #[validate(email)]
    pub contact_recipient_email: String,
    pub contact_recipient_name: String,
}

/// Mail transport selection - exactly one concrete transport, chosen by
/// explicit configuration at startup, never by deployment accident
#[derive(Debug, Clone)]
pub enum TransportConfig {
    /// Direct SMTP session (supports attachments)
    Smtp(SmtpConfig),
    /// Provider REST mail API behind an OAuth refresh token (plaintext only)
    Api(MailApiConfig),
}

impl TransportConfig {
    /// Get the transport type as a string
    pub fn transport_type(&self) -> &'static str {
        match self {
            Self::Smtp(_) => "smtp",
            Self::Api(_) => "api",
        }
    }
}

/// SMTP configuration
#[derive(Debug, Clone, Validate)]
pub struct SmtpConfig {
    /// SMTP server host
    #[validate(length(min = 1, max = 255))]
    pub host: String,
    /// SMTP server port (465 implies implicit TLS, anything else STARTTLS)
    pub port: u16,
    /// Username for authentication
    #[validate(length(min = 1))]
    pub username: String,
    /// Password for authentication
    pub password: String,
}

/// Provider mail API configuration
#[derive(Debug, Clone, Validate)]
pub struct MailApiConfig {
    /// OAuth token endpoint
    #[validate(length(min = 1))]
    pub token_url: String,
    /// Base URL of the provider's REST mail API
    #[validate(length(min = 1))]
    pub api_base_url: String,
    /// Provider account the messages are sent through
    #[validate(length(min = 1))]
    pub account_id: String,
    /// OAuth client id
    #[validate(length(min = 1))]
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Long-lived refresh token exchanged for an access token on every send
    pub refresh_token: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let transport = match env::var("MAIL_TRANSPORT")
            .context("MAIL_TRANSPORT is required (smtp or api)")?
            .to_lowercase()
            .as_str()
        {
            "smtp" => TransportConfig::Smtp(SmtpConfig {
                host: env::var("SMTP_HOST").context("SMTP_HOST is required")?,
                port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .context("Invalid SMTP_PORT")?,
                username: env::var("SMTP_USERNAME").context("SMTP_USERNAME is required")?,
                password: env::var("SMTP_PASSWORD").context("SMTP_PASSWORD is required")?,
            }),
            "api" => TransportConfig::Api(MailApiConfig {
                token_url: env::var("MAIL_API_TOKEN_URL")
                    .context("MAIL_API_TOKEN_URL is required")?,
                api_base_url: env::var("MAIL_API_BASE_URL")
                    .context("MAIL_API_BASE_URL is required")?,
                account_id: env::var("MAIL_API_ACCOUNT_ID")
                    .context("MAIL_API_ACCOUNT_ID is required")?,
                client_id: env::var("MAIL_API_CLIENT_ID")
                    .context("MAIL_API_CLIENT_ID is required")?,
                client_secret: env::var("MAIL_API_CLIENT_SECRET")
                    .context("MAIL_API_CLIENT_SECRET is required")?,
                refresh_token: env::var("MAIL_API_REFRESH_TOKEN")
                    .context("MAIL_API_REFRESH_TOKEN is required")?,
            }),
            other => anyhow::bail!("Unknown MAIL_TRANSPORT '{}' (expected smtp or api)", other),
        };

        let config = Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            send_timeout_secs: env::var("SEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("Invalid SEND_TIMEOUT_SECS")?,
            forms: FormsConfig {
                site_name: env::var("SITE_NAME").unwrap_or_else(|_| "Website".to_string()),
                from_email: env::var("MAIL_FROM_EMAIL").context("MAIL_FROM_EMAIL is required")?,
                career_enabled: env::var("FORMS_CAREER_ENABLED")
                    .map(|s| s.to_lowercase() != "false")
                    .unwrap_or(true),
                career_recipient_email: env::var("CAREER_RECIPIENT_EMAIL")
                    .context("CAREER_RECIPIENT_EMAIL is required")?,
                career_recipient_name: env::var("CAREER_RECIPIENT_NAME")
                    .unwrap_or_else(|_| "Recruiting".to_string()),
                contact_recipient_email: env::var("CONTACT_RECIPIENT_EMAIL")
                    .context("CONTACT_RECIPIENT_EMAIL is required")?,
                contact_recipient_name: env::var("CONTACT_RECIPIENT_NAME")
                    .unwrap_or_else(|_| "Reception".to_string()),
            },
            transport,
        };

        config.validate_startup()?;

        Ok(config)
    }

    /// Cross-field validation performed once at startup.
    ///
    /// The career flow accepts resume attachments, and the API transport
    /// cannot carry them; that mismatch must fail here, not at send time.
    pub fn validate_startup(&self) -> Result<()> {
        self.forms
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid form configuration: {}", e))?;

        match &self.transport {
            TransportConfig::Smtp(smtp) => smtp
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid SMTP configuration: {}", e))?,
            TransportConfig::Api(api) => {
                api.validate()
                    .map_err(|e| anyhow::anyhow!("Invalid mail API configuration: {}", e))?;

                if self.forms.career_enabled {
                    anyhow::bail!(
                        "the career flow accepts resume attachments, which the mail API \
                         transport cannot send; set MAIL_TRANSPORT=smtp or \
                         FORMS_CAREER_ENABLED=false"
                    );
                }
            }
        }

        Ok(())
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Timeout for outbound mail calls
    pub fn send_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.send_timeout_secs)
    }
}
