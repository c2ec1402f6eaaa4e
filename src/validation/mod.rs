//! Submission Validator
//!
//! The validation rules live once, as a declarative schema, and are consumed
//! by both the server handlers and the form client. Validation never mutates
//! external state; it either produces a [`SanitizedSubmission`] or a map of
//! per-field errors.

pub mod sanitize;

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidateEmail;

use crate::domain::{RawSubmission, SanitizedSubmission, SubmissionKind, UploadedFile};

/// Field name to human-readable error message
pub type FieldErrors = BTreeMap<String, String>;

/// Wire name of the uploaded-file part
pub const RESUME_FIELD: &str = "resume";

/// Inclusive attachment size cap: 5 MiB
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Declared MIME types accepted for an uploaded resume
pub const ALLOWED_ATTACHMENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Expected format of a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Free text, no format constraint
    Text,
    /// Must parse as an email address
    Email,
    /// Digits, whitespace, `+`, `-` and parentheses only
    Phone,
}

/// One rule of the declarative field schema
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Wire name of the field
    pub name: &'static str,
    /// Label used in error messages
    pub label: &'static str,
    pub required: bool,
    pub format: FieldFormat,
}

/// File acceptance policy of a submission kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePolicy {
    /// A file must be supplied
    Required,
    /// A file may be supplied; when present it is checked like any other
    Optional,
    /// No file is accepted
    Rejected,
}

const CAREER_RULES: &[FieldRule] = &[
    FieldRule { name: "firstName", label: "First name", required: true, format: FieldFormat::Text },
    FieldRule { name: "lastName", label: "Last name", required: true, format: FieldFormat::Text },
    FieldRule { name: "post", label: "Position", required: true, format: FieldFormat::Text },
    FieldRule { name: "email", label: "Email", required: true, format: FieldFormat::Email },
    FieldRule { name: "contactNo", label: "Contact number", required: true, format: FieldFormat::Phone },
    FieldRule { name: "address", label: "Address", required: true, format: FieldFormat::Text },
];

const CONTACT_RULES: &[FieldRule] = &[
    FieldRule { name: "name", label: "Name", required: true, format: FieldFormat::Text },
    FieldRule { name: "contact", label: "Contact", required: true, format: FieldFormat::Text },
    FieldRule { name: "subject", label: "Subject", required: true, format: FieldFormat::Text },
    FieldRule { name: "body", label: "Message", required: true, format: FieldFormat::Text },
];

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^[0-9\s\-\+\(\)]+$").expect("valid phone regex");
}

/// The field schema of a submission kind
pub fn rules(kind: SubmissionKind) -> &'static [FieldRule] {
    match kind {
        SubmissionKind::CareerApplication => CAREER_RULES,
        SubmissionKind::ContactForm => CONTACT_RULES,
    }
}

/// The file policy of a submission kind
pub fn file_policy(kind: SubmissionKind) -> FilePolicy {
    match kind {
        SubmissionKind::CareerApplication => FilePolicy::Optional,
        SubmissionKind::ContactForm => FilePolicy::Rejected,
    }
}

/// Validate a raw submission against the schema of its kind.
///
/// Returns the sanitized submission, or every field error found. Fields not
/// named by the schema are dropped.
pub fn validate(
    kind: SubmissionKind,
    raw: RawSubmission,
) -> Result<SanitizedSubmission, FieldErrors> {
    let mut errors = FieldErrors::new();

    for rule in rules(kind) {
        let value = raw
            .fields
            .get(rule.name)
            .map(|v| v.trim())
            .unwrap_or_default();

        if value.is_empty() {
            if rule.required {
                errors.insert(rule.name.to_string(), format!("{} is required", rule.label));
            }
            continue;
        }

        match rule.format {
            FieldFormat::Text => {}
            FieldFormat::Email => {
                if !value.validate_email() {
                    errors.insert(
                        rule.name.to_string(),
                        "Please enter a valid email address".to_string(),
                    );
                }
            }
            FieldFormat::Phone => {
                if !PHONE_RE.is_match(value) {
                    errors.insert(
                        rule.name.to_string(),
                        "Please enter a valid contact number".to_string(),
                    );
                }
            }
        }
    }

    check_file(file_policy(kind), raw.file.as_ref(), &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut fields = BTreeMap::new();
    for rule in rules(kind) {
        if let Some(value) = raw.fields.get(rule.name) {
            fields.insert(rule.name.to_string(), sanitize::clean_text(value));
        }
    }

    Ok(SanitizedSubmission::new(kind, fields, raw.file))
}

/// Apply a file policy, recording any error under the resume field
fn check_file(policy: FilePolicy, file: Option<&UploadedFile>, errors: &mut FieldErrors) {
    match (policy, file) {
        (FilePolicy::Required, None) => {
            errors.insert(RESUME_FIELD.to_string(), "Resume is required".to_string());
        }
        (FilePolicy::Rejected, Some(_)) => {
            errors.insert(
                RESUME_FIELD.to_string(),
                "This form does not accept file uploads".to_string(),
            );
        }
        (FilePolicy::Required | FilePolicy::Optional, Some(file)) => {
            if !ALLOWED_ATTACHMENT_TYPES.contains(&file.content_type.as_str()) {
                errors.insert(
                    RESUME_FIELD.to_string(),
                    "Please upload a PDF or Word document".to_string(),
                );
            } else if file.size() > MAX_ATTACHMENT_BYTES {
                errors.insert(
                    RESUME_FIELD.to_string(),
                    "File size must be less than 5 MB".to_string(),
                );
            }
        }
        (FilePolicy::Optional | FilePolicy::Rejected, None) => {}
    }
}
