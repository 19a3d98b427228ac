//! DTOs for the estimate endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::estimate::Estimate;
use crate::forms::FieldErrors;

/// Query parameters accepted by `GET /api/estimates`.
#[derive(Debug, Default, Deserialize)]
pub struct EstimatesQuery {
    pub client_id: Option<i32>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Estimate with its printed reference.
#[derive(Debug, Serialize)]
pub struct EstimateView {
    pub number: String,
    #[serde(flatten)]
    pub estimate: Estimate,
}

impl From<Estimate> for EstimateView {
    fn from(estimate: Estimate) -> Self {
        Self {
            number: estimate.number(),
            estimate,
        }
    }
}

/// Outcome of validating a single wizard step.
#[derive(Debug, Serialize)]
pub struct WizardValidationResponse {
    pub valid: bool,
    pub errors: FieldErrors,
}

impl From<FieldErrors> for WizardValidationResponse {
    fn from(errors: FieldErrors) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Body returned once an estimate email has been handed to the provider.
#[derive(Debug, Serialize)]
pub struct SendEstimateResponse {
    pub success: bool,
    pub message_id: String,
}
