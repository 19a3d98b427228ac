//! JSON API handlers.
//!
//! Handlers resolve the caller's profile, delegate to a service and turn the
//! outcome into a JSON response.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use serde_json::json;

use crate::services::{ServiceError, ServiceResult};

pub mod addons;
pub mod clients;
pub mod estimates;
pub mod profile;
pub mod projects;
pub mod send_estimate;
pub mod settings;
pub mod templates;

/// Largest JSON body accepted; sized for a base64 encoded PDF attachment.
pub const JSON_BODY_LIMIT: usize = 16 * 1024 * 1024;
/// Largest raw body accepted by the CSV import.
pub const CSV_BODY_LIMIT: usize = 4 * 1024 * 1024;

fn error_body(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "success": false,
        "error": message,
    }))
}

/// Maps a service failure to its HTTP response. Internal details are logged
/// and never returned to the caller.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => error_body(StatusCode::UNAUTHORIZED, "Unauthorized"),
        ServiceError::NotFound => error_body(StatusCode::NOT_FOUND, "Not found"),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            error_body(StatusCode::BAD_REQUEST, &message)
        }
        ServiceError::Pricing(err) => error_body(StatusCode::BAD_REQUEST, &err.to_string()),
        ServiceError::Validation(errors) => HttpResponse::UnprocessableEntity().json(json!({
            "success": false,
            "error": "Validation failed",
            "errors": errors,
        })),
        ServiceError::Mailer(err) => {
            log::error!("Mail provider failure: {err}");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send email")
        }
        err @ (ServiceError::Repository(_) | ServiceError::Internal(_)) => {
            log::error!("Request failed: {err}");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// `200 OK` with the value as JSON, or the mapped error.
pub(crate) fn respond<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(err) => error_response(err),
    }
}

/// `201 Created` with the value as JSON, or the mapped error.
pub(crate) fn created<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Created().json(value),
        Err(err) => error_response(err),
    }
}

/// `204 No Content`, or the mapped error.
pub(crate) fn no_content(result: ServiceResult<()>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

/// Answers undecodable JSON bodies with a JSON error.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let status = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };
    log::debug!("Rejected JSON body: {err}");
    let message = match status {
        StatusCode::BAD_REQUEST => format!("Invalid JSON: {err}"),
        _ => err.to_string(),
    };
    InternalError::from_response(err, error_body(status, &message)).into()
}

/// Answers malformed query strings with a JSON error.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_body(StatusCode::BAD_REQUEST, &err.to_string());
    InternalError::from_response(err, response).into()
}

/// Registers every API route under the current scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(json_error_handler),
    )
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .app_data(web::PayloadConfig::new(CSV_BODY_LIMIT))
    .service(profile::show_profile)
    .service(profile::save_profile)
    .service(clients::list_clients)
    .service(clients::create_client)
    .service(clients::import_clients)
    .service(clients::show_client)
    .service(clients::save_client)
    .service(clients::delete_client)
    .service(projects::list_projects)
    .service(projects::create_project)
    .service(projects::show_project)
    .service(projects::save_project)
    .service(projects::delete_project)
    .service(settings::list_trades)
    .service(settings::show_pricing)
    .service(settings::save_pricing)
    .service(addons::list_addons)
    .service(addons::create_addon)
    .service(addons::save_addon)
    .service(addons::delete_addon)
    .service(templates::list_templates)
    .service(templates::create_template)
    .service(templates::show_template)
    .service(templates::delete_template)
    .service(estimates::validate_step)
    .service(estimates::calculate)
    .service(estimates::list_estimates)
    .service(estimates::create_estimate)
    .service(estimates::show_estimate)
    .service(estimates::save_status)
    .service(estimates::delete_estimate)
    .service(send_estimate::send_estimate);
}
