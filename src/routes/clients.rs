use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::client::{ClientsQuery, ImportResponse};
use crate::forms::client::ClientForm;
use crate::repository::DieselRepository;
use crate::routes::{created, no_content, respond};
use crate::services::clients as clients_service;
use crate::services::profile::ensure_profile;

#[get("/clients")]
pub async fn list_clients(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<ClientsQuery>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(
        ensure_profile(repo, &user).and_then(|profile| {
            clients_service::list_clients(repo, profile.id, query.into_inner())
        }),
    )
}

#[post("/clients")]
pub async fn create_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ClientForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    created(
        ensure_profile(repo, &user)
            .and_then(|profile| clients_service::create_client(repo, profile.id, form)),
    )
}

/// Bulk import. The request body is the CSV file itself.
#[post("/clients/import")]
pub async fn import_clients(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(
        ensure_profile(repo, &user)
            .and_then(|profile| clients_service::import_clients(repo, profile.id, &body))
            .map(|imported| ImportResponse {
                success: true,
                imported,
            }),
    )
}

#[get("/clients/{client_id}")]
pub async fn show_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(
        ensure_profile(repo, &user).and_then(|profile| {
            clients_service::get_client(repo, profile.id, client_id.into_inner())
        }),
    )
}

#[put("/clients/{client_id}")]
pub async fn save_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ClientForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    respond(ensure_profile(repo, &user).and_then(|profile| {
        clients_service::update_client(repo, profile.id, client_id.into_inner(), form)
    }))
}

#[delete("/clients/{client_id}")]
pub async fn delete_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let repo = repo.get_ref();
    no_content(ensure_profile(repo, &user).and_then(|profile| {
        clients_service::delete_client(repo, profile.id, client_id.into_inner())
    }))
}
