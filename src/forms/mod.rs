//! Request payloads accepted by the JSON API and their validation.

use std::collections::BTreeMap;

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::pricing::PricingError;

pub mod addon;
pub mod client;
pub mod estimate;
pub mod profile;
pub mod project;
pub mod send_estimate;
pub mod settings;
pub mod template;

#[derive(Debug, Error)]
/// Errors that can occur when processing request data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("{0}")]
    Pricing(#[from] PricingError),

    #[error("invalid CSV: {0}")]
    Csv(String),

    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid PDF data")]
    InvalidPdf,

    #[error("PDF attachment exceeds {0} bytes")]
    PdfTooLarge(usize),

    #[error("Invalid detail level `{0}`")]
    InvalidDetailLevel(String),

    #[error("Invalid status `{0}`")]
    InvalidStatus(String),
}

/// Messages per field, ordered by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Appends `message` to the errors of `field`.
pub fn push_field_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

/// Flattens `validator` errors into per-field messages.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut result = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        for err in errs {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            push_field_error(&mut result, &field, message);
        }
    }
    result
}
