use actix_web::{HttpResponse, get, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::profile::ProfileForm;
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::profile as profile_service;

#[get("/profile")]
pub async fn show_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    respond(profile_service::ensure_profile(repo.get_ref(), &user))
}

#[put("/profile")]
pub async fn save_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProfileForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(
        profile_service::ensure_profile(repo, &user)
            .and_then(|profile| profile_service::update_profile(repo, profile.id, form)),
    )
}
