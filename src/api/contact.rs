//! Contact form endpoint
//!
//! Accepts a flat JSON object of string fields.

use std::collections::HashMap;

use axum::{body::Bytes, extract::State, response::IntoResponse, Json};

use super::SubmitResponse;
use crate::domain::{RawSubmission, SubmissionKind};
use crate::error::{AppError, Result};
use crate::server::AppState;
use crate::validation;

/// Handle a contact form submission
pub async fn submit(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let fields: HashMap<String, String> = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest("Invalid JSON body".to_string()))?;

    let raw = RawSubmission { fields, file: None };

    let submission =
        validation::validate(SubmissionKind::ContactForm, raw).map_err(AppError::Validation)?;

    state.dispatcher.dispatch(submission).await?;

    Ok(Json(SubmitResponse::sent("Email sent successfully")))
}
