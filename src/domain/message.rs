//! Outbound mail message types

/// Email address with optional display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    pub email: String,
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }

    /// Render as `Name <address>` when a display name is set
    pub fn display(&self) -> String {
        if let Some(name) = &self.name {
            format!("{} <{}>", name, self.email)
        } else {
            self.email.clone()
        }
    }
}

/// A file carried by an outbound message
#[derive(Debug, Clone)]
pub struct MessageAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl From<crate::domain::UploadedFile> for MessageAttachment {
    fn from(file: crate::domain::UploadedFile) -> Self {
        Self {
            filename: file.filename,
            content_type: file.content_type,
            data: file.data,
        }
    }
}

/// A fully assembled mail message.
///
/// Constructed once per accepted submission, handed to exactly one transport
/// attempt, and discarded.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub from: EmailAddress,
    pub to: EmailAddress,
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    pub text_body: String,
    pub html_body: Option<String>,
    pub attachment: Option<MessageAttachment>,
}

impl OutboundMessage {
    pub fn new(
        from: EmailAddress,
        to: EmailAddress,
        subject: impl Into<String>,
        text_body: impl Into<String>,
    ) -> Self {
        Self {
            from,
            to,
            reply_to: None,
            subject: subject.into(),
            text_body: text_body.into(),
            html_body: None,
            attachment: None,
        }
    }

    pub fn with_reply_to(mut self, reply_to: Option<EmailAddress>) -> Self {
        self.reply_to = reply_to;
        self
    }

    pub fn with_html_body(mut self, html_body: impl Into<String>) -> Self {
        self.html_body = Some(html_body.into());
        self
    }

    pub fn with_attachment(mut self, attachment: Option<MessageAttachment>) -> Self {
        self.attachment = attachment;
        self
    }
}

/// What a transport reports back after a successful send
#[derive(Debug, Clone)]
pub struct SendReceipt {
    /// Provider-assigned message id, when one is returned
    pub message_id: Option<String>,
}
