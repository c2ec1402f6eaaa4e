//! Message templates
//!
//! Simple variable substitution with `{{variable_name}}` syntax. Every value
//! substituted into a template has already been through the sanitizer.

use std::collections::HashMap;

/// Available message templates, one per submission kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTemplate {
    /// Career application relay (styled HTML + plaintext fallback)
    CareerApplication,
    /// Contact form relay (plaintext only)
    ContactForm,
}

impl MessageTemplate {
    /// Get the subject line for this template
    pub fn subject(&self) -> &'static str {
        match self {
            Self::CareerApplication => {
                "New Career Application: {{post}} - {{firstName}} {{lastName}}"
            }
            Self::ContactForm => "{{subject}}",
        }
    }

    /// Get the HTML body template, for kinds that render one
    pub fn html_body(&self) -> Option<&'static str> {
        match self {
            Self::CareerApplication => Some(CAREER_TEMPLATE),
            Self::ContactForm => None,
        }
    }

    /// Get the plain text body template
    pub fn text_body(&self) -> &'static str {
        match self {
            Self::CareerApplication => CAREER_TEMPLATE_TEXT,
            Self::ContactForm => CONTACT_TEMPLATE_TEXT,
        }
    }
}

/// Template rendering engine with variable substitution
#[derive(Debug, Default)]
pub struct TemplateEngine {
    variables: HashMap<String, String>,
}

impl TemplateEngine {
    /// Create a new template engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Render a template string, replacing {{variable}} with values
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();

        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{}}}}}", key);
            result = result.replace(&placeholder, value);
        }

        result
    }

    /// Render a complete message template
    pub fn render_template(&self, template: MessageTemplate) -> RenderedMessage {
        RenderedMessage {
            subject: self.render(template.subject()),
            text_body: self.render(template.text_body()),
            html_body: template.html_body().map(|body| self.render(body)),
        }
    }
}

/// Rendered message with all variables substituted
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    pub subject: String,
    pub text_body: String,
    pub html_body: Option<String>,
}

// ============================================================================
// Templates
// ============================================================================

const CAREER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>New Career Application</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background-color: #f5f5f5; }
        .container { max-width: 600px; margin: 40px auto; padding: 0; background: #ffffff; border-radius: 8px; overflow: hidden; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .header { background-color: #309ed9; color: #ffffff; padding: 24px; text-align: center; }
        .header h1 { margin: 0; font-size: 22px; }
        .content { padding: 24px; }
        .field { margin-bottom: 14px; }
        .label { font-weight: 600; color: #309ed9; }
        .value { margin-left: 8px; }
        .footer { padding: 16px 24px; background-color: #f0f0f0; text-align: center; font-size: 12px; color: #666; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>New Career Application Received</h1>
        </div>
        <div class="content">
            <div class="field"><span class="label">Name:</span><span class="value">{{firstName}} {{lastName}}</span></div>
            <div class="field"><span class="label">Position Applied For:</span><span class="value">{{post}}</span></div>
            <div class="field"><span class="label">Email:</span><span class="value">{{email}}</span></div>
            <div class="field"><span class="label">Contact Number:</span><span class="value">{{contactNo}}</span></div>
            <div class="field"><span class="label">Address:</span><span class="value">{{address}}</span></div>
            <div class="field"><span class="label">Resume:</span><span class="value">{{resume_note}}</span></div>
        </div>
        <div class="footer">
            <p>This application was submitted from the {{site_name}} career page on {{submitted_at}}</p>
        </div>
    </div>
</body>
</html>"#;

const CAREER_TEMPLATE_TEXT: &str = r#"New Career Application Received

Name: {{firstName}} {{lastName}}
Position Applied For: {{post}}
Email: {{email}}
Contact Number: {{contactNo}}
Address: {{address}}
Resume: {{resume_note}}

Submitted on: {{submitted_at}}"#;

const CONTACT_TEMPLATE_TEXT: &str = r#"New Contact Form Submission

Name: {{name}}
Contact: {{contact}}

Message:
{{body}}

---
Sent from: {{site_name}} contact form
Time: {{submitted_at}}"#;
