//! Estimate wizard, pricing and lifecycle.

use crate::domain::estimate::{Estimate, EstimateStatus, NewEstimate};
use crate::domain::types::{ClientId, EstimateId, ProfileId, ProjectId};
use crate::dto::estimate::{EstimateView, EstimatesQuery, WizardValidationResponse};
use crate::forms::estimate::{
    CalculateForm, ClientStep, EstimateDraft, EstimateForm, EstimateStatusForm, PricingRequest,
    WizardStepForm,
};
use crate::forms::{FieldErrors, FormError, push_field_error};
use crate::pagination::{Paginated, page_params};
use crate::pricing::{self, EstimateBreakdown, PricingInput};
use crate::repository::{
    ClientReader, EstimateListQuery, EstimateReader, EstimateWriter, PricingSettingsReader,
    ProjectReader,
};
use crate::services::settings::effective_settings;
use crate::services::{ServiceError, ServiceResult, path_id};

/// Records field errors when the client or project is not the caller's, or
/// when the project belongs to another client.
fn check_ownership<R>(
    repo: &R,
    profile_id: ProfileId,
    client_id: ClientId,
    project_id: Option<ProjectId>,
    errors: &mut FieldErrors,
) -> ServiceResult<()>
where
    R: ClientReader + ProjectReader + ?Sized,
{
    if repo.get_client_by_id(client_id, profile_id)?.is_none() {
        push_field_error(errors, "client_id", "Client not found");
        return Ok(());
    }

    if let Some(project_id) = project_id {
        match repo.get_project_by_id(project_id, profile_id)? {
            Some(project) if project.client_id == client_id => {}
            Some(_) => push_field_error(errors, "project_id", "Project belongs to another client"),
            None => push_field_error(errors, "project_id", "Project not found"),
        }
    }
    Ok(())
}

/// Checks one wizard step. The client step is also checked against the
/// caller's clients and projects.
pub fn validate_wizard_step<R>(
    repo: &R,
    profile_id: ProfileId,
    form: &WizardStepForm,
) -> ServiceResult<WizardValidationResponse>
where
    R: ClientReader + ProjectReader + ?Sized,
{
    let mut errors = form.check();

    if !errors.is_empty() {
        return Ok(errors.into());
    }

    if let Some(ClientStep {
        client_id: Some(client_id),
        project_id,
    }) = form.client_step()
    {
        let client_id = ClientId::new(client_id)?;
        let project_id = project_id.map(ProjectId::new).transpose()?;
        check_ownership(repo, profile_id, client_id, project_id, &mut errors)?;
    }

    Ok(errors.into())
}

fn price<R>(
    repo: &R,
    profile_id: ProfileId,
    request: &PricingRequest,
) -> ServiceResult<EstimateBreakdown>
where
    R: PricingSettingsReader + ?Sized,
{
    let settings = effective_settings(repo, profile_id, request.trade)?;

    pricing::calculate(PricingInput {
        trade: request.trade,
        measurements: &request.measurements,
        complexity: request.complexity,
        addons: &request.addons,
        settings: &settings,
    })
    .map_err(|err| {
        log::error!("Failed to price {} estimate: {err}", request.trade);
        ServiceError::from(err)
    })
}

/// Prices the wizard input with the caller's settings without storing it.
pub fn calculate_estimate<R>(
    repo: &R,
    profile_id: ProfileId,
    form: CalculateForm,
) -> ServiceResult<EstimateBreakdown>
where
    R: PricingSettingsReader + ?Sized,
{
    let request = form.into_request().map_err(ServiceError::Validation)?;
    price(repo, profile_id, &request)
}

/// Validates the complete wizard, prices it and stores a draft estimate.
pub fn create_estimate<R>(
    repo: &R,
    profile_id: ProfileId,
    form: EstimateForm,
) -> ServiceResult<EstimateView>
where
    R: ClientReader + ProjectReader + PricingSettingsReader + EstimateWriter + ?Sized,
{
    let draft = EstimateDraft::try_from(form).map_err(ServiceError::Validation)?;

    let mut errors = FieldErrors::new();
    check_ownership(repo, profile_id, draft.client_id, draft.project_id, &mut errors)?;
    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    let breakdown = price(repo, profile_id, &draft.pricing)?;
    let new_estimate = NewEstimate {
        profile_id,
        client_id: draft.client_id,
        project_id: draft.project_id,
        title: draft.title,
        measurements: draft.pricing.measurements,
        addons: draft.pricing.addons,
        notes: draft.notes,
        breakdown,
    };

    repo.create_estimate(&new_estimate)
        .map(EstimateView::from)
        .map_err(|err| {
            log::error!("Failed to save estimate: {err}");
            ServiceError::from(err)
        })
}

pub fn list_estimates<R>(
    repo: &R,
    profile_id: ProfileId,
    query: EstimatesQuery,
) -> ServiceResult<Paginated<EstimateView>>
where
    R: EstimateReader + ?Sized,
{
    let (page, per_page) = page_params(query.page, query.per_page);
    let mut list_query = EstimateListQuery::new(profile_id).paginate(page, per_page);

    if let Some(client_id) = query.client_id {
        list_query = list_query.client(ClientId::new(client_id)?);
    }
    if let Some(raw) = query.status.filter(|s| !s.trim().is_empty()) {
        let status = raw
            .trim()
            .parse::<EstimateStatus>()
            .map_err(|_| FormError::InvalidStatus(raw.clone()))?;
        list_query = list_query.status(status);
    }

    let (total, estimates) = repo.list_estimates(list_query).map_err(|err| {
        log::error!("Failed to list estimates: {err}");
        ServiceError::from(err)
    })?;

    Ok(Paginated::new(estimates, total, page, per_page).map(EstimateView::from))
}

/// Loads an estimate owned by the caller.
pub(crate) fn owned_estimate<R>(
    repo: &R,
    profile_id: ProfileId,
    estimate_id: EstimateId,
) -> ServiceResult<Estimate>
where
    R: EstimateReader + ?Sized,
{
    repo.get_estimate_by_id(estimate_id, profile_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn get_estimate<R>(
    repo: &R,
    profile_id: ProfileId,
    estimate_id: i32,
) -> ServiceResult<EstimateView>
where
    R: EstimateReader + ?Sized,
{
    owned_estimate(repo, profile_id, path_id(estimate_id)?).map(EstimateView::from)
}

/// Moves an estimate to a new status. `sent` is reserved for the send
/// endpoint and accepted/declined require a sent estimate.
pub fn update_estimate_status<R>(
    repo: &R,
    profile_id: ProfileId,
    estimate_id: i32,
    form: EstimateStatusForm,
) -> ServiceResult<EstimateView>
where
    R: EstimateReader + EstimateWriter + ?Sized,
{
    let estimate_id: EstimateId = path_id(estimate_id)?;
    let next = EstimateStatus::try_from(form)?;
    let estimate = owned_estimate(repo, profile_id, estimate_id)?;

    if !estimate.status.can_update_to(next) {
        return Err(ServiceError::Form(format!(
            "Cannot change status from {} to {next}",
            estimate.status
        )));
    }

    repo.update_estimate_status(estimate_id, profile_id, next, None)
        .map(EstimateView::from)
        .map_err(|err| {
            log::error!("Failed to update estimate {estimate_id}: {err}");
            ServiceError::from(err)
        })
}

pub fn delete_estimate<R>(repo: &R, profile_id: ProfileId, estimate_id: i32) -> ServiceResult<()>
where
    R: EstimateWriter + ?Sized,
{
    repo.delete_estimate(path_id(estimate_id)?, profile_id)
        .map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
pub(crate) mod tests {
    use chrono::NaiveDateTime;
    use serde_json::json;

    use super::*;
    use crate::domain::client::Client;
    use crate::domain::pricing_settings::TradePricingSettings;
    use crate::domain::project::Project;
    use crate::domain::types::{ClientName, EstimateTitle, ProjectName};
    use crate::forms::estimate::WizardStep;
    use crate::pricing::{Complexity, PricingSettings, Trade};
    use crate::repository::mock::MockRepository;

    fn profile_id() -> ProfileId {
        ProfileId::new(1).unwrap()
    }

    fn client(id: i32) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            profile_id: profile_id(),
            name: ClientName::new("Jane Smith").unwrap(),
            email: None,
            phone: None,
            address: None,
            notes: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn project(id: i32, client_id: i32) -> Project {
        Project {
            id: ProjectId::new(id).unwrap(),
            profile_id: profile_id(),
            client_id: ClientId::new(client_id).unwrap(),
            name: ProjectName::new("Basement").unwrap(),
            address: None,
            description: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    pub(crate) fn estimate(id: i32, status: EstimateStatus) -> Estimate {
        let measurements = [("wall_sqft".to_string(), 1000.0)].into_iter().collect();
        let breakdown = pricing::calculate(PricingInput {
            trade: Trade::DrywallHanging,
            measurements: &measurements,
            complexity: Complexity::Simple,
            addons: &[],
            settings: &PricingSettings::default(),
        })
        .unwrap();
        Estimate {
            id: EstimateId::new(id).unwrap(),
            profile_id: profile_id(),
            client_id: ClientId::new(4).unwrap(),
            project_id: None,
            title: EstimateTitle::new("Basement drywall").unwrap(),
            trade: Trade::DrywallHanging,
            complexity: Complexity::Simple,
            measurements,
            addons: Vec::new(),
            notes: None,
            total: breakdown.total,
            low: breakdown.low,
            high: breakdown.high,
            breakdown,
            status,
            sent_at: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn estimate_form(client_id: i32, project_id: Option<i32>) -> EstimateForm {
        serde_json::from_value(json!({
            "client_id": client_id,
            "project_id": project_id,
            "trade": "drywall_hanging",
            "measurements": {"wall_sqft": 1000.0},
            "complexity": "simple",
            "title": "Basement drywall",
        }))
        .unwrap()
    }

    #[test]
    fn client_step_checks_ownership() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_, _| Ok(None));

        let form = WizardStepForm {
            step: WizardStep::Client,
            data: json!({"client_id": 8}),
        };
        let response = validate_wizard_step(&repo, profile_id(), &form).unwrap();
        assert!(!response.valid);
        assert_eq!(response.errors["client_id"], vec!["Client not found".to_string()]);
    }

    #[test]
    fn other_steps_do_not_touch_storage() {
        let repo = MockRepository::new();
        let form = WizardStepForm {
            step: WizardStep::Review,
            data: json!({"title": "Kitchen"}),
        };
        assert!(validate_wizard_step(&repo, profile_id(), &form).unwrap().valid);
    }

    #[test]
    fn calculate_uses_stored_settings() {
        let mut repo = MockRepository::new();
        repo.expect_get_pricing_settings().returning(|profile_id, trade| {
            let mut stored = TradePricingSettings::defaults(profile_id, trade);
            stored.settings.minimum_charge = 5000.0;
            Ok(Some(stored))
        });

        let form: CalculateForm = serde_json::from_value(json!({
            "trade": "drywall_hanging",
            "measurements": {"wall_sqft": 1000.0},
            "complexity": "simple",
        }))
        .unwrap();
        let breakdown = calculate_estimate(&repo, profile_id(), form).unwrap();
        assert!(breakdown.minimum_applied);
        assert_eq!(breakdown.total, 5000.0);
    }

    #[test]
    fn calculate_reports_field_errors() {
        let repo = MockRepository::new();
        let form: CalculateForm = serde_json::from_value(json!({"trade": "painting"})).unwrap();

        match calculate_estimate(&repo, profile_id(), form) {
            Err(ServiceError::Validation(errors)) => {
                assert!(errors.contains_key("measurements"));
                assert!(errors.contains_key("complexity"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn create_prices_and_stores_draft() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|id, _| Ok(Some(client(id.get()))));
        repo.expect_get_project_by_id()
            .returning(|id, _| Ok(Some(project(id.get(), 4))));
        repo.expect_get_pricing_settings().returning(|_, _| Ok(None));
        repo.expect_create_estimate()
            .withf(|e| {
                e.breakdown.total == 1000.0
                    && e.trade() == Trade::DrywallHanging
                    && e.project_id.map(ProjectId::get) == Some(2)
            })
            .times(1)
            .returning(|_| Ok(estimate(11, EstimateStatus::Draft)));

        let view = create_estimate(&repo, profile_id(), estimate_form(4, Some(2))).unwrap();
        assert_eq!(view.number, "EST-00011");
    }

    #[test]
    fn create_rejects_project_of_other_client() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(|id, _| Ok(Some(client(id.get()))));
        repo.expect_get_project_by_id()
            .returning(|id, _| Ok(Some(project(id.get(), 99))));
        repo.expect_create_estimate().times(0);

        match create_estimate(&repo, profile_id(), estimate_form(4, Some(2))) {
            Err(ServiceError::Validation(errors)) => assert!(errors.contains_key("project_id")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn list_rejects_unknown_status_filter() {
        let mut repo = MockRepository::new();
        repo.expect_list_estimates().times(0);

        let query = EstimatesQuery {
            status: Some("lost".into()),
            ..EstimatesQuery::default()
        };
        assert!(matches!(
            list_estimates(&repo, profile_id(), query),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn list_passes_filters() {
        let mut repo = MockRepository::new();
        repo.expect_list_estimates()
            .withf(|q| {
                q.status == Some(EstimateStatus::Sent) && q.client_id.map(ClientId::get) == Some(4)
            })
            .returning(|_| Ok((1, vec![estimate(3, EstimateStatus::Sent)])));

        let query = EstimatesQuery {
            client_id: Some(4),
            status: Some("sent".into()),
            ..EstimatesQuery::default()
        };
        let page = list_estimates(&repo, profile_id(), query).unwrap();
        assert_eq!(page.items[0].number, "EST-00003");
    }

    #[test]
    fn draft_cannot_be_accepted() {
        let mut repo = MockRepository::new();
        repo.expect_get_estimate_by_id()
            .returning(|id, _| Ok(Some(estimate(id.get(), EstimateStatus::Draft))));
        repo.expect_update_estimate_status().times(0);

        let form = EstimateStatusForm {
            status: "accepted".into(),
        };
        assert!(matches!(
            update_estimate_status(&repo, profile_id(), 5, form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn sent_estimate_can_be_accepted() {
        let mut repo = MockRepository::new();
        repo.expect_get_estimate_by_id()
            .returning(|id, _| Ok(Some(estimate(id.get(), EstimateStatus::Sent))));
        repo.expect_update_estimate_status()
            .withf(|_, _, status, sent_at| *status == EstimateStatus::Accepted && sent_at.is_none())
            .returning(|id, _, status, _| Ok(estimate(id.get(), status)));

        let form = EstimateStatusForm {
            status: "accepted".into(),
        };
        let view = update_estimate_status(&repo, profile_id(), 5, form).unwrap();
        assert_eq!(view.estimate.status, EstimateStatus::Accepted);
    }
}
