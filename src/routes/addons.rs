use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::templates::AddonsResponse;
use crate::forms::addon::AddonForm;
use crate::repository::DieselRepository;
use crate::routes::{created, no_content, respond};
use crate::services::addons as addons_service;
use crate::services::profile::ensure_profile;

#[get("/addons")]
pub async fn list_addons(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(
        ensure_profile(repo, &user)
            .and_then(|profile| addons_service::list_addons(repo, profile.id))
            .map(|addons| AddonsResponse { addons }),
    )
}

#[post("/addons")]
pub async fn create_addon(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddonForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    created(
        ensure_profile(repo, &user)
            .and_then(|profile| addons_service::create_addon(repo, profile.id, form)),
    )
}

#[put("/addons/{addon_id}")]
pub async fn save_addon(
    addon_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddonForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(ensure_profile(repo, &user).and_then(|profile| {
        addons_service::update_addon(repo, profile.id, addon_id.into_inner(), form)
    }))
}

#[delete("/addons/{addon_id}")]
pub async fn delete_addon(
    addon_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    no_content(ensure_profile(repo, &user).and_then(|profile| {
        addons_service::delete_addon(repo, profile.id, addon_id.into_inner())
    }))
}
