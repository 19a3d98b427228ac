use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::estimate::EstimatesQuery;
use crate::forms::estimate::{CalculateForm, EstimateForm, EstimateStatusForm, WizardStepForm};
use crate::repository::DieselRepository;
use crate::routes::{created, error_response, no_content, respond};
use crate::services::estimates as estimates_service;
use crate::services::profile::ensure_profile;

/// Checks one wizard step. Invalid steps are answered with 422 and the
/// same `{valid, errors}` body.
#[post("/estimates/wizard/validate")]
pub async fn validate_step(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<WizardStepForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    let result = ensure_profile(repo, &user)
        .and_then(|profile| estimates_service::validate_wizard_step(repo, profile.id, &form));

    match result {
        Ok(response) if response.valid => HttpResponse::Ok().json(response),
        Ok(response) => HttpResponse::UnprocessableEntity().json(response),
        Err(err) => error_response(err),
    }
}

#[post("/estimates/calculate")]
pub async fn calculate(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CalculateForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(
        ensure_profile(repo, &user)
            .and_then(|profile| estimates_service::calculate_estimate(repo, profile.id, form)),
    )
}

#[get("/estimates")]
pub async fn list_estimates(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<EstimatesQuery>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(ensure_profile(repo, &user).and_then(|profile| {
        estimates_service::list_estimates(repo, profile.id, query.into_inner())
    }))
}

#[post("/estimates")]
pub async fn create_estimate(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<EstimateForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    created(
        ensure_profile(repo, &user)
            .and_then(|profile| estimates_service::create_estimate(repo, profile.id, form)),
    )
}

#[get("/estimates/{estimate_id}")]
pub async fn show_estimate(
    estimate_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(ensure_profile(repo, &user).and_then(|profile| {
        estimates_service::get_estimate(repo, profile.id, estimate_id.into_inner())
    }))
}

#[put("/estimates/{estimate_id}/status")]
pub async fn save_status(
    estimate_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<EstimateStatusForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(ensure_profile(repo, &user).and_then(|profile| {
        estimates_service::update_estimate_status(repo, profile.id, estimate_id.into_inner(), form)
    }))
}

#[delete("/estimates/{estimate_id}")]
pub async fn delete_estimate(
    estimate_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    no_content(ensure_profile(repo, &user).and_then(|profile| {
        estimates_service::delete_estimate(repo, profile.id, estimate_id.into_inner())
    }))
}
