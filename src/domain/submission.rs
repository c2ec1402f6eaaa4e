//! Form submission types

use std::collections::{BTreeMap, HashMap};

/// The two form flows served by this service. Each kind declares its own
/// required-field list and file policy (see the validation schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    /// Career application (fields + optional resume upload)
    CareerApplication,
    /// General contact message (fields only)
    ContactForm,
}

impl SubmissionKind {
    /// Human-readable label used in sender display names and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::CareerApplication => "Career Application",
            Self::ContactForm => "Contact Form",
        }
    }
}

/// A file received with a submission, exactly as declared by the sender
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename
    pub filename: String,
    /// Declared MIME type
    pub content_type: String,
    /// File content
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A submission as received off the wire, before any validation
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
    /// Field name to raw value
    pub fields: HashMap<String, String>,
    /// At most one uploaded file
    pub file: Option<UploadedFile>,
}

impl RawSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_file(mut self, file: UploadedFile) -> Self {
        self.file = Some(file);
        self
    }
}

/// A submission that passed validation. Only the validator constructs this;
/// every field value has been trimmed, tag-stripped and entity-escaped.
#[derive(Debug, Clone)]
pub struct SanitizedSubmission {
    pub kind: SubmissionKind,
    fields: BTreeMap<String, String>,
    file: Option<UploadedFile>,
}

impl SanitizedSubmission {
    pub(crate) fn new(
        kind: SubmissionKind,
        fields: BTreeMap<String, String>,
        file: Option<UploadedFile>,
    ) -> Self {
        Self { kind, fields, file }
    }

    /// Sanitized value of a field, or the empty string if absent
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn take_file(&mut self) -> Option<UploadedFile> {
        self.file.take()
    }
}
