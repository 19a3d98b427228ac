use actix_web::{HttpResponse, get, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::settings::PricingSettingsForm;
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::profile::ensure_profile;
use crate::services::settings as settings_service;

/// Default schedules, identical for every caller.
#[get("/settings/trades")]
pub async fn list_trades(_user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(settings_service::list_trades())
}

#[get("/settings/pricing/{trade}")]
pub async fn show_pricing(
    trade: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(ensure_profile(repo, &user).and_then(|profile| {
        settings_service::get_trade_settings(repo, profile.id, &trade)
    }))
}

#[put("/settings/pricing/{trade}")]
pub async fn save_pricing(
    trade: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<PricingSettingsForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(ensure_profile(repo, &user).and_then(|profile| {
        settings_service::save_trade_settings(repo, profile.id, &trade, form)
    }))
}
