//! Career application endpoint
//!
//! Accepts `multipart/form-data`: the text fields of the application plus an
//! optional `resume` file part.

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    response::IntoResponse,
    Json,
};

use super::SubmitResponse;
use crate::domain::{RawSubmission, SubmissionKind, UploadedFile};
use crate::error::{AppError, Result};
use crate::server::AppState;
use crate::validation::{self, RESUME_FIELD};

/// Handle a career application submission
pub async fn submit(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    if !state.config.forms.career_enabled {
        return Err(AppError::Configuration(
            "career submissions are disabled for this deployment".to_string(),
        ));
    }

    let multipart = multipart
        .map_err(|_| AppError::BadRequest("Expected multipart form data".to_string()))?;
    let raw = read_multipart(multipart).await?;

    let submission = validation::validate(SubmissionKind::CareerApplication, raw)
        .map_err(AppError::Validation)?;

    state.dispatcher.dispatch(submission).await?;

    Ok(Json(SubmitResponse::sent(
        "Application submitted successfully! We will review your application and get back \
         to you soon.",
    )))
}

/// Collect multipart parts into a raw submission.
///
/// Browsers send an empty `resume` part when no file was selected; that is
/// treated as no file at all.
async fn read_multipart(mut multipart: Multipart) -> Result<RawSubmission> {
    let mut raw = RawSubmission::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == RESUME_FIELD {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let data = field.bytes().await?;

            if !filename.is_empty() && !data.is_empty() {
                raw.file = Some(UploadedFile::new(filename, content_type, data.to_vec()));
            }
        } else if !name.is_empty() {
            let value = field.text().await?;
            raw.fields.insert(name, value);
        }
    }

    Ok(raw)
}
