//! Form Controller
//!
//! The submitting counterpart of the server: holds form state (field values,
//! per-field errors, an in-flight flag, a result notice), runs the same
//! validation schema the server enforces, and posts the submission to a
//! Formgate deployment or to a third-party form relay.
//!
//! The server never trusts this local validation; it revalidates everything.

use std::collections::HashMap;

use reqwest::multipart::{Form, Part};

use crate::api::SubmitResponse;
use crate::domain::{RawSubmission, SubmissionKind, UploadedFile};
use crate::validation::{self, FieldErrors, RESUME_FIELD};

/// Notice shown when the endpoint rejects the submission
pub const GENERIC_FAILURE: &str =
    "There was a problem submitting the form. Please try again or contact us directly.";

/// Notice shown when the request never completed
pub const NETWORK_FAILURE: &str =
    "Network error occurred. Please check your connection and try again.";

/// Where submissions are posted
#[derive(Debug, Clone)]
pub enum FormTarget {
    /// A Formgate deployment; the form-specific path is appended
    Server { base_url: String },
    /// A third-party form relay taking a flat JSON document (no file upload;
    /// career submissions carry only the resume filename)
    Relay { url: String },
}

/// HTTP client for form submissions
pub struct FormClient {
    http_client: reqwest::Client,
    target: FormTarget,
}

enum SubmitFailure {
    /// The endpoint answered with a non-success status
    Rejected,
    /// The request failed before an answer arrived
    Network,
}

impl FormClient {
    /// Client posting to a Formgate deployment
    pub fn server(base_url: impl Into<String>) -> reqwest::Result<Self> {
        Self::new(FormTarget::Server {
            base_url: base_url.into(),
        })
    }

    /// Client posting to a third-party form relay
    pub fn relay(url: impl Into<String>) -> reqwest::Result<Self> {
        Self::new(FormTarget::Relay { url: url.into() })
    }

    fn new(target: FormTarget) -> reqwest::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            target,
        })
    }

    fn submit_url(&self, kind: SubmissionKind) -> String {
        match &self.target {
            FormTarget::Server { base_url } => {
                let path = match kind {
                    SubmissionKind::CareerApplication => "career",
                    SubmissionKind::ContactForm => "contact",
                };
                format!("{}/api/v1/forms/{}", base_url.trim_end_matches('/'), path)
            }
            FormTarget::Relay { url } => url.clone(),
        }
    }

    async fn post_submission(
        &self,
        kind: SubmissionKind,
        values: &HashMap<String, String>,
        resume: Option<&UploadedFile>,
    ) -> Result<String, SubmitFailure> {
        let url = self.submit_url(kind);

        let request = match (&self.target, kind) {
            // The relay takes JSON only; a resume is reduced to its filename.
            (FormTarget::Relay { .. }, _) => {
                let mut payload = values.clone();
                if kind == SubmissionKind::CareerApplication {
                    payload.insert(
                        "resumeFileName".to_string(),
                        resume
                            .map(|file| file.filename.clone())
                            .unwrap_or_else(|| "Not provided".to_string()),
                    );
                }
                self.http_client.post(&url).json(&payload)
            }
            (FormTarget::Server { .. }, SubmissionKind::ContactForm) => {
                self.http_client.post(&url).json(values)
            }
            (FormTarget::Server { .. }, SubmissionKind::CareerApplication) => {
                let mut form = Form::new();
                for (name, value) in values {
                    form = form.text(name.clone(), value.clone());
                }
                if let Some(file) = resume {
                    let part = Part::bytes(file.data.clone())
                        .file_name(file.filename.clone())
                        .mime_str(&file.content_type)
                        .map_err(|_| SubmitFailure::Rejected)?;
                    form = form.part(RESUME_FIELD, part);
                }
                self.http_client.post(&url).multipart(form)
            }
        };

        let response = request.send().await.map_err(|_| SubmitFailure::Network)?;

        if !response.status().is_success() {
            return Err(SubmitFailure::Rejected);
        }

        // Prefer the endpoint's own success message when it sends one
        let message = response
            .json::<SubmitResponse>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| "Submitted successfully".to_string());

        Ok(message)
    }
}

/// In-memory state of one form
#[derive(Debug)]
pub struct FormSession {
    kind: SubmissionKind,
    values: HashMap<String, String>,
    resume: Option<UploadedFile>,
    /// Per-field error messages from the last validation run
    pub errors: FieldErrors,
    /// True while a submission is in flight; blocks re-entry
    pub submitting: bool,
    /// Result notice of the last submit attempt
    pub notice: Option<String>,
    /// Whether the last submit attempt went through
    pub succeeded: bool,
}

impl FormSession {
    pub fn new(kind: SubmissionKind) -> Self {
        Self {
            kind,
            values: HashMap::new(),
            resume: None,
            errors: FieldErrors::new(),
            submitting: false,
            notice: None,
            succeeded: false,
        }
    }

    /// Record a field edit, clearing that field's error
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.errors.remove(&name);
        self.values.insert(name, value.into());
    }

    /// Current value of a field
    pub fn field(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Attach (or replace) the resume file
    pub fn attach_resume(&mut self, file: UploadedFile) {
        self.errors.remove(RESUME_FIELD);
        self.resume = Some(file);
    }

    fn to_raw(&self) -> RawSubmission {
        RawSubmission {
            fields: self.values.clone(),
            file: self.resume.clone(),
        }
    }

    /// Validate locally and, when clean, post the submission.
    ///
    /// A call while a submission is already in flight is ignored; that is the
    /// whole duplicate-submission guard, and the only one needed.
    pub async fn submit(&mut self, client: &FormClient) {
        if self.submitting {
            return;
        }

        if let Err(errors) = validation::validate(self.kind, self.to_raw()) {
            self.errors = errors;
            self.succeeded = false;
            return;
        }

        self.submitting = true;
        self.errors.clear();
        self.notice = None;

        let outcome = client
            .post_submission(self.kind, &self.values, self.resume.as_ref())
            .await;

        self.submitting = false;

        match outcome {
            Ok(message) => {
                self.values.clear();
                self.resume = None;
                self.notice = Some(message);
                self.succeeded = true;
            }
            Err(SubmitFailure::Rejected) => {
                self.notice = Some(GENERIC_FAILURE.to_string());
                self.succeeded = false;
            }
            Err(SubmitFailure::Network) => {
                self.notice = Some(NETWORK_FAILURE.to_string());
                self.succeeded = false;
            }
        }
    }
}
