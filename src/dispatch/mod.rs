//! Mail Dispatcher
//!
//! Turns an accepted submission into an [`OutboundMessage`] (template
//! rendering, reply-to extraction, attachment wiring) and hands it to the
//! configured transport. One dispatch performs exactly one transport attempt;
//! there is no retry and no queue.

pub mod templates;

use std::sync::Arc;

use chrono::Utc;
use validator::ValidateEmail;

use crate::config::FormsConfig;
use crate::domain::{
    EmailAddress, OutboundMessage, SanitizedSubmission, SendReceipt, SubmissionKind,
};
use crate::error::{AppError, Result};
use crate::transport::MailTransport;
use crate::validation;
use templates::{MessageTemplate, TemplateEngine};

/// Renders messages and routes them to the configured transport
pub struct MailDispatcher {
    transport: Arc<dyn MailTransport>,
    forms: FormsConfig,
}

impl std::fmt::Debug for MailDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailDispatcher")
            .field("transport", &self.transport.transport_name())
            .field("forms", &self.forms)
            .finish()
    }
}

impl MailDispatcher {
    /// Create a dispatcher over the configured transport.
    ///
    /// The career flow can carry a resume attachment, so pairing it with a
    /// transport that cannot send attachments is refused here, at
    /// composition time, rather than being discovered on the first upload.
    pub fn new(transport: Arc<dyn MailTransport>, forms: FormsConfig) -> Result<Self> {
        if forms.career_enabled && !transport.supports_attachments() {
            return Err(AppError::Configuration(format!(
                "the career flow requires attachment support, but the '{}' transport cannot \
                 send attachments",
                transport.transport_name()
            )));
        }

        Ok(Self { transport, forms })
    }

    /// Relay one accepted submission as an email
    pub async fn dispatch(&self, submission: SanitizedSubmission) -> Result<SendReceipt> {
        let kind = submission.kind;
        let message = self.build_message(submission);

        tracing::info!(
            kind = kind.label(),
            transport = self.transport.transport_name(),
            recipient = %message.to.email,
            "dispatching form submission"
        );

        let receipt = self.transport.send(&message).await?;

        tracing::info!(
            kind = kind.label(),
            message_id = receipt.message_id.as_deref().unwrap_or("-"),
            "submission relayed"
        );

        Ok(receipt)
    }

    fn build_message(&self, mut submission: SanitizedSubmission) -> OutboundMessage {
        let kind = submission.kind;
        let file = submission.take_file();

        let mut engine = TemplateEngine::new();
        for rule in validation::rules(kind) {
            engine.set(rule.name, submission.field(rule.name));
        }
        engine.set("site_name", self.forms.site_name.clone());
        engine.set(
            "submitted_at",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );

        let from = EmailAddress::with_name(
            self.forms.from_email.clone(),
            format!("{} - {}", kind.label(), self.forms.site_name),
        );

        match kind {
            SubmissionKind::CareerApplication => {
                engine.set(
                    "resume_note",
                    match &file {
                        Some(file) => format!("Attached ({})", file.filename),
                        None => "Not provided".to_string(),
                    },
                );

                let rendered = engine.render_template(MessageTemplate::CareerApplication);
                let to = EmailAddress::with_name(
                    self.forms.career_recipient_email.clone(),
                    self.forms.career_recipient_name.clone(),
                );

                // The applicant's address was already validated, so it can be
                // used as the reply-to directly.
                let reply_to = EmailAddress::with_name(
                    submission.field("email"),
                    format!(
                        "{} {}",
                        submission.field("firstName"),
                        submission.field("lastName")
                    ),
                );

                let mut message =
                    OutboundMessage::new(from, to, rendered.subject, rendered.text_body)
                        .with_reply_to(Some(reply_to))
                        .with_attachment(file.map(Into::into));
                if let Some(html) = rendered.html_body {
                    message = message.with_html_body(html);
                }
                message
            }
            SubmissionKind::ContactForm => {
                let rendered = engine.render_template(MessageTemplate::ContactForm);
                let to = EmailAddress::with_name(
                    self.forms.contact_recipient_email.clone(),
                    self.forms.contact_recipient_name.clone(),
                );

                let reply_to = extract_reply_to(submission.field("contact")).map(|address| {
                    EmailAddress::with_name(address, submission.field("name"))
                });

                OutboundMessage::new(from, to, rendered.subject, rendered.text_body)
                    .with_reply_to(reply_to)
            }
        }
    }
}

/// Recover a usable reply-to address from a combined contact field.
///
/// The field often looks like `jane@example.com | Phone: +91-9999999999`; the
/// segment before the first `|` wins when it is a valid address. A value with
/// no usable address yields no reply-to, which is not an error.
pub fn extract_reply_to(contact: &str) -> Option<String> {
    let candidate = contact.split('|').next().unwrap_or(contact).trim();

    if candidate.validate_email() {
        Some(candidate.to_string())
    } else {
        None
    }
}
