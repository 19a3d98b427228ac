//! Estimate wizard payloads.
//!
//! The wizard collects an estimate in five steps. Each step can be checked
//! on its own while the user moves through the wizard, and the complete
//! form is checked again before anything is priced or stored. Errors are
//! reported per field so they can be shown next to the inputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::estimate::EstimateStatus;
use crate::domain::types::{ClientId, EstimateTitle, Notes, ProjectId};
use crate::forms::{FieldErrors, FormError, field_errors, push_field_error};
use crate::pricing::{AddonLine, Complexity, Measurements, Trade};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Client,
    Scope,
    Complexity,
    Addons,
    Review,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientStep {
    #[serde(default)]
    pub client_id: Option<i32>,
    #[serde(default)]
    pub project_id: Option<i32>,
}

impl ClientStep {
    fn parse(&self, errors: &mut FieldErrors) -> Option<(ClientId, Option<ProjectId>)> {
        let client_id = match self.client_id {
            None => {
                push_field_error(errors, "client_id", "Select a client");
                None
            }
            Some(id) => ClientId::new(id)
                .inspect_err(|_| push_field_error(errors, "client_id", "Invalid client"))
                .ok(),
        };
        let project_id = match self.project_id.map(ProjectId::new).transpose() {
            Ok(project_id) => project_id,
            Err(_) => {
                push_field_error(errors, "project_id", "Invalid project");
                return None;
            }
        };
        client_id.map(|client_id| (client_id, project_id))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeStep {
    #[serde(default)]
    pub trade: Option<String>,
    #[serde(default)]
    pub measurements: BTreeMap<String, f64>,
}

impl ScopeStep {
    fn parse(&self, errors: &mut FieldErrors) -> Option<(Trade, Measurements)> {
        let trade = match self.trade.as_deref().map(str::trim) {
            None | Some("") => {
                push_field_error(errors, "trade", "Select a trade");
                return None;
            }
            Some(raw) => match raw.parse::<Trade>() {
                Ok(trade) => trade,
                Err(e) => {
                    push_field_error(errors, "trade", e.to_string());
                    return None;
                }
            },
        };

        let mut valid = true;
        for (key, value) in &self.measurements {
            let field = format!("measurements.{key}");
            if trade.quantity(key).is_none() {
                push_field_error(errors, &field, format!("Not a {} measurement", trade.label()));
                valid = false;
            } else if !value.is_finite() || *value < 0.0 {
                push_field_error(errors, &field, "Must be zero or more");
                valid = false;
            }
        }
        if valid && !self.measurements.values().any(|v| *v > 0.0) {
            push_field_error(errors, "measurements", "Enter at least one measurement");
            valid = false;
        }

        valid.then(|| {
            let measurements: Measurements = self
                .measurements
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect();
            (trade, measurements)
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ComplexityStep {
    #[serde(default)]
    pub complexity: Option<String>,
    #[serde(default)]
    #[validate(length(max = 5000, message = "Notes are too long"))]
    pub notes: Option<String>,
}

impl ComplexityStep {
    fn parse(&self, errors: &mut FieldErrors) -> Option<(Complexity, Option<Notes>)> {
        if let Err(e) = self.validate() {
            errors.extend(field_errors(&e));
            return None;
        }
        match self.complexity.as_deref().map(str::trim) {
            None | Some("") => {
                push_field_error(errors, "complexity", "Select a complexity");
                None
            }
            Some(raw) => match raw.parse::<Complexity>() {
                Ok(complexity) => Some((complexity, Notes::from_optional(self.notes.clone()))),
                Err(e) => {
                    push_field_error(errors, "complexity", e.to_string());
                    None
                }
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddonsStep {
    #[serde(default)]
    pub addons: Vec<AddonLine>,
}

impl AddonsStep {
    fn parse(&self, errors: &mut FieldErrors) -> Option<Vec<AddonLine>> {
        let mut valid = true;
        for (idx, addon) in self.addons.iter().enumerate() {
            if addon.validate().is_err() {
                push_field_error(
                    errors,
                    &format!("addons[{idx}]"),
                    "Addon needs a name and non-negative price and quantity",
                );
                valid = false;
            }
        }
        valid.then(|| self.addons.clone())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewStep {
    #[serde(default)]
    #[validate(length(max = 200, message = "Title is too long"))]
    pub title: Option<String>,
}

impl ReviewStep {
    fn parse(&self, errors: &mut FieldErrors) -> Option<EstimateTitle> {
        if let Err(e) = self.validate() {
            errors.extend(field_errors(&e));
            return None;
        }
        EstimateTitle::new(self.title.clone().unwrap_or_default())
            .inspect_err(|_| push_field_error(errors, "title", "Title is required"))
            .ok()
    }
}

/// Request body of the single step validation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WizardStepForm {
    pub step: WizardStep,
    #[serde(default)]
    pub data: Value,
}

impl WizardStepForm {
    /// Checks the step data; an empty map means the step is valid.
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match self.step {
            WizardStep::Client => {
                if let Some(step) = self.decode::<ClientStep>(&mut errors) {
                    step.parse(&mut errors);
                }
            }
            WizardStep::Scope => {
                if let Some(step) = self.decode::<ScopeStep>(&mut errors) {
                    step.parse(&mut errors);
                }
            }
            WizardStep::Complexity => {
                if let Some(step) = self.decode::<ComplexityStep>(&mut errors) {
                    step.parse(&mut errors);
                }
            }
            WizardStep::Addons => {
                if let Some(step) = self.decode::<AddonsStep>(&mut errors) {
                    step.parse(&mut errors);
                }
            }
            WizardStep::Review => {
                if let Some(step) = self.decode::<ReviewStep>(&mut errors) {
                    step.parse(&mut errors);
                }
            }
        }
        errors
    }

    /// Step data as submitted by the client step, when it decodes.
    pub fn client_step(&self) -> Option<ClientStep> {
        (self.step == WizardStep::Client)
            .then(|| self.decode::<ClientStep>(&mut FieldErrors::new()))
            .flatten()
    }

    fn decode<T: for<'de> Deserialize<'de>>(&self, errors: &mut FieldErrors) -> Option<T> {
        let data = if self.data.is_null() {
            Value::Object(Default::default())
        } else {
            self.data.clone()
        };
        serde_json::from_value(data)
            .inspect_err(|e| push_field_error(errors, "data", e.to_string()))
            .ok()
    }
}

/// Pricing inputs shared by the preview and the saved estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRequest {
    pub trade: Trade,
    pub measurements: Measurements,
    pub complexity: Complexity,
    pub addons: Vec<AddonLine>,
}

/// Body of the price preview endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculateForm {
    #[serde(flatten)]
    pub scope: ScopeStep,
    #[serde(flatten)]
    pub complexity: ComplexityStep,
    #[serde(flatten)]
    pub addons: AddonsStep,
}

impl CalculateForm {
    pub fn into_request(self) -> Result<PricingRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let scope = self.scope.parse(&mut errors);
        let complexity = self.complexity.parse(&mut errors);
        let addons = self.addons.parse(&mut errors);

        match (scope, complexity, addons) {
            (Some((trade, measurements)), Some((complexity, _)), Some(addons)) => {
                Ok(PricingRequest {
                    trade,
                    measurements,
                    complexity,
                    addons,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Complete wizard submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimateForm {
    #[serde(flatten)]
    pub client: ClientStep,
    #[serde(flatten)]
    pub scope: ScopeStep,
    #[serde(flatten)]
    pub complexity: ComplexityStep,
    #[serde(flatten)]
    pub addons: AddonsStep,
    #[serde(flatten)]
    pub review: ReviewStep,
}

/// Wizard submission that passed every step.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateDraft {
    pub client_id: ClientId,
    pub project_id: Option<ProjectId>,
    pub title: EstimateTitle,
    pub notes: Option<Notes>,
    pub pricing: PricingRequest,
}

impl TryFrom<EstimateForm> for EstimateDraft {
    type Error = FieldErrors;

    fn try_from(form: EstimateForm) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let client = form.client.parse(&mut errors);
        let scope = form.scope.parse(&mut errors);
        let complexity = form.complexity.parse(&mut errors);
        let addons = form.addons.parse(&mut errors);
        let title = form.review.parse(&mut errors);

        match (client, scope, complexity, addons, title) {
            (
                Some((client_id, project_id)),
                Some((trade, measurements)),
                Some((complexity, notes)),
                Some(addons),
                Some(title),
            ) => Ok(EstimateDraft {
                client_id,
                project_id,
                title,
                notes,
                pricing: PricingRequest {
                    trade,
                    measurements,
                    complexity,
                    addons,
                },
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimateStatusForm {
    pub status: String,
}

impl TryFrom<EstimateStatusForm> for EstimateStatus {
    type Error = FormError;

    fn try_from(form: EstimateStatusForm) -> Result<Self, Self::Error> {
        form.status
            .trim()
            .parse::<EstimateStatus>()
            .map_err(|_| FormError::InvalidStatus(form.status))
    }
}
