use actix_web::{HttpResponse, post, web};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::forms::send_estimate::SendEstimateForm;
use crate::mailer::EstimateMailer;
use crate::repository::DieselRepository;
use crate::routes::{error_response, respond};
use crate::services::profile::ensure_profile;
use crate::services::send_estimate as send_service;

/// Emails an estimate with its PDF to the client and marks it sent.
#[post("/send-estimate")]
pub async fn send_estimate(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    mailer: web::Data<dyn EstimateMailer>,
    tera: web::Data<Tera>,
    web::Json(form): web::Json<SendEstimateForm>,
) -> HttpResponse {
    let repo = repo.get_ref();
    let profile = match ensure_profile(repo, &user) {
        Ok(profile) => profile,
        Err(err) => return error_response(err),
    };

    respond(
        send_service::send_estimate(repo, mailer.get_ref(), tera.get_ref(), &profile, form).await,
    )
}
