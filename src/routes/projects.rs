use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::project::ProjectForm;
use crate::repository::DieselRepository;
use crate::routes::{created, no_content, respond};
use crate::services::profile::ensure_profile;
use crate::services::projects as projects_service;

#[get("/clients/{client_id}/projects")]
pub async fn list_projects(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(ensure_profile(repo, &user).and_then(|profile| {
        projects_service::list_projects(repo, profile.id, client_id.into_inner())
    }))
}

#[post("/clients/{client_id}/projects")]
pub async fn create_project(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProjectForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    created(ensure_profile(repo, &user).and_then(|profile| {
        projects_service::create_project(repo, profile.id, client_id.into_inner(), form)
    }))
}

#[get("/projects/{project_id}")]
pub async fn show_project(
    project_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(ensure_profile(repo, &user).and_then(|profile| {
        projects_service::get_project(repo, profile.id, project_id.into_inner())
    }))
}

#[put("/projects/{project_id}")]
pub async fn save_project(
    project_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProjectForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(ensure_profile(repo, &user).and_then(|profile| {
        projects_service::update_project(repo, profile.id, project_id.into_inner(), form)
    }))
}

#[delete("/projects/{project_id}")]
pub async fn delete_project(
    project_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    no_content(ensure_profile(repo, &user).and_then(|profile| {
        projects_service::delete_project(repo, profile.id, project_id.into_inner())
    }))
}
