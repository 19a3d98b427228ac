use actix_web::{HttpResponse, delete, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::dto::templates::TemplatesResponse;
use crate::forms::template::TemplateForm;
use crate::repository::DieselRepository;
use crate::routes::{created, no_content, respond};
use crate::services::profile::ensure_profile;
use crate::services::templates as templates_service;

#[get("/templates")]
pub async fn list_templates(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(
        ensure_profile(repo, &user)
            .and_then(|profile| templates_service::list_templates(repo, profile.id))
            .map(|templates| TemplatesResponse { templates }),
    )
}

#[post("/templates")]
pub async fn create_template(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<TemplateForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    created(
        ensure_profile(repo, &user)
            .and_then(|profile| templates_service::create_template(repo, profile.id, form)),
    )
}

#[get("/templates/{template_id}")]
pub async fn show_template(
    template_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(ensure_profile(repo, &user).and_then(|profile| {
        templates_service::get_template(repo, profile.id, template_id.into_inner())
    }))
}

#[delete("/templates/{template_id}")]
pub async fn delete_template(
    template_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    no_content(ensure_profile(repo, &user).and_then(|profile| {
        templates_service::delete_template(repo, profile.id, template_id.into_inner())
    }))
}
