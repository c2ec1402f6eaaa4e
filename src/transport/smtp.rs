//! SMTP transport implementation using lettre

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Body, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::{MailTransport, TransportError};
use crate::config::SmtpConfig;
use crate::domain::{EmailAddress, OutboundMessage, SendReceipt};

/// Port that implies an implicit-TLS session; everything else uses STARTTLS
const SMTPS_PORT: u16 = 465;

/// SMTP-based mail transport
pub struct SmtpTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    /// Create a new SMTP transport from configuration
    pub fn from_config(config: &SmtpConfig, timeout: Duration) -> Result<Self, TransportError> {
        let builder = if config.port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| TransportError::InvalidConfiguration(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| TransportError::InvalidConfiguration(e.to_string()))?
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(timeout))
            .build();

        Ok(Self { transport })
    }

    fn build_email(&self, message: &OutboundMessage) -> Result<Message, TransportError> {
        let mut builder = Message::builder()
            .from(parse_mailbox(&message.from)?)
            .to(parse_mailbox(&message.to)?)
            .subject(&message.subject);

        if let Some(reply_to) = &message.reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to)?);
        }

        let text_part = SinglePart::builder()
            .header(ContentType::TEXT_PLAIN)
            .body(message.text_body.clone());

        let email = match (&message.html_body, &message.attachment) {
            (None, None) => builder
                .header(ContentType::TEXT_PLAIN)
                .body(message.text_body.clone()),
            (Some(html), None) => builder.multipart(
                MultiPart::alternative().singlepart(text_part).singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html.clone()),
                ),
            ),
            (html, Some(file)) => {
                let content_type = ContentType::parse(&file.content_type).map_err(|e| {
                    TransportError::InvalidConfiguration(format!(
                        "Invalid attachment type: {}",
                        e
                    ))
                })?;
                let attachment_part = Attachment::new(file.filename.clone())
                    .body(Body::new(file.data.clone()), content_type);

                let content = match html {
                    Some(html) => MultiPart::mixed()
                        .multipart(MultiPart::alternative().singlepart(text_part).singlepart(
                            SinglePart::builder()
                                .header(ContentType::TEXT_HTML)
                                .body(html.clone()),
                        ))
                        .singlepart(attachment_part),
                    None => MultiPart::mixed()
                        .singlepart(text_part)
                        .singlepart(attachment_part),
                };

                builder.multipart(content)
            }
        }
        .map_err(|e| TransportError::SendFailed(e.to_string()))?;

        Ok(email)
    }
}

fn parse_mailbox(address: &EmailAddress) -> Result<Mailbox, TransportError> {
    address.display().parse().map_err(|e| {
        TransportError::InvalidConfiguration(format!("Invalid address {}: {}", address.email, e))
    })
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<SendReceipt, TransportError> {
        let email = self.build_email(message)?;

        match self.transport.send(email).await {
            Ok(response) => {
                let message_id = response.message().next().map(|s| s.to_string());
                Ok(SendReceipt { message_id })
            }
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains("authentication") || error_msg.contains("AUTH") {
                    Err(TransportError::AuthenticationFailed(error_msg))
                } else if error_msg.contains("connection") || error_msg.contains("timeout") {
                    Err(TransportError::ConnectionError(error_msg))
                } else {
                    Err(TransportError::SendFailed(error_msg))
                }
            }
        }
    }

    fn supports_attachments(&self) -> bool {
        true
    }

    fn transport_name(&self) -> &'static str {
        "smtp"
    }
}
