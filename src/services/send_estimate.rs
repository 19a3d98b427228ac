//! Emailing an estimate to a client.
//!
//! The caller supplies the rendered PDF. The service checks the payload,
//! renders the email body at the requested detail level, hands the message
//! to the mail provider and finally marks the estimate as sent.

use chrono::Utc;
use serde_json::json;
use tera::{Context, Tera};

use crate::domain::estimate::{Estimate, EstimateStatus};
use crate::domain::profile::Profile;
use crate::domain::types::EstimateId;
use crate::dto::estimate::SendEstimateResponse;
use crate::forms::send_estimate::{DetailLevel, SendEstimateForm, SendEstimatePayload};
use crate::mailer::{Attachment, ESTIMATE_EMAIL_TEMPLATE, EstimateMailer, OutgoingEmail};
use crate::repository::{ClientReader, EstimateReader, EstimateWriter};
use crate::services::estimates::owned_estimate;
use crate::services::{ServiceError, ServiceResult};

/// Email ready to be handed to the mailer.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedEmail {
    pub estimate_id: EstimateId,
    pub email: OutgoingEmail,
}

/// Formats dollars with thousands separators, e.g. `$12,345.60`.
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (idx, digit) in dollars.chars().enumerate() {
        if idx > 0 && (dollars.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn render_body(
    tera: &Tera,
    profile: &Profile,
    estimate: &Estimate,
    recipient_name: Option<&str>,
    message: Option<&str>,
    detail_level: DetailLevel,
) -> ServiceResult<String> {
    let breakdown = &estimate.breakdown;
    let line_items = breakdown
        .line_items
        .iter()
        .map(|item| {
            json!({
                "label": item.label,
                "quantity": format_quantity(item.quantity),
                "unit": item.unit.abbreviation(),
                "rate": format_money(item.rate),
                "amount": format_money(item.amount),
            })
        })
        .collect::<Vec<_>>();
    let addons = breakdown
        .addons
        .iter()
        .map(|addon| {
            json!({
                "name": addon.name,
                "quantity": format_quantity(addon.quantity),
                "rate": format_money(addon.unit_price),
                "amount": format_money(addon.amount),
            })
        })
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("business_name", profile.display_name());
    context.insert("number", &estimate.number());
    context.insert("title", estimate.title.as_str());
    context.insert("trade", estimate.trade.label());
    context.insert("complexity", estimate.complexity.as_str());
    context.insert("recipient_name", &recipient_name);
    context.insert("message", &message);
    context.insert("total", &format_money(estimate.total));
    context.insert("low", &format_money(estimate.low));
    context.insert("high", &format_money(estimate.high));
    context.insert("detailed", &(detail_level == DetailLevel::Detailed));
    context.insert("line_items", &line_items);
    context.insert("addons", &addons);
    context.insert("adjusted_labor", &format_money(breakdown.adjusted_labor));
    context.insert("materials", &format_money(breakdown.materials_subtotal));
    context.insert("addons_total", &format_money(breakdown.addons_total));
    context.insert("minimum_applied", &breakdown.minimum_applied);

    tera.render(ESTIMATE_EMAIL_TEMPLATE, &context).map_err(|err| {
        log::error!("Failed to render estimate email: {err}");
        ServiceError::Internal(err.to_string())
    })
}

/// Checks the request and builds the email without sending it.
pub fn prepare_estimate_email<R>(
    repo: &R,
    tera: &Tera,
    profile: &Profile,
    form: SendEstimateForm,
) -> ServiceResult<PreparedEmail>
where
    R: EstimateReader + ClientReader + ?Sized,
{
    let payload = SendEstimatePayload::try_from(form)?;
    let estimate = owned_estimate(repo, profile.id, payload.estimate_id)?;

    if !estimate.status.can_send() {
        return Err(ServiceError::Form(format!(
            "A {} estimate cannot be sent",
            estimate.status
        )));
    }

    let recipient_name = match payload.recipient_name {
        Some(name) => Some(name),
        None => repo
            .get_client_by_id(estimate.client_id, profile.id)?
            .map(|client| client.name.into_inner()),
    };

    let html = render_body(
        tera,
        profile,
        &estimate,
        recipient_name.as_deref(),
        payload.message.as_deref(),
        payload.detail_level,
    )?;
    let subject = payload.subject.unwrap_or_else(|| {
        format!(
            "Estimate {} from {}",
            estimate.number(),
            profile.display_name()
        )
    });

    Ok(PreparedEmail {
        estimate_id: estimate.id,
        email: OutgoingEmail {
            to: payload.recipient_email.into_inner(),
            to_name: recipient_name,
            subject,
            html,
            reply_to: Some(profile.email.as_str().to_string()),
            attachments: vec![Attachment {
                filename: payload.pdf_filename,
                content: payload.pdf,
                content_type: "application/pdf".to_string(),
            }],
        },
    })
}

/// Emails the estimate and marks it as sent.
pub async fn send_estimate<R>(
    repo: &R,
    mailer: &dyn EstimateMailer,
    tera: &Tera,
    profile: &Profile,
    form: SendEstimateForm,
) -> ServiceResult<SendEstimateResponse>
where
    R: EstimateReader + EstimateWriter + ClientReader + ?Sized,
{
    let prepared = prepare_estimate_email(repo, tera, profile, form)?;

    let message_id = mailer.send(&prepared.email).await.map_err(|err| {
        log::error!(
            "Failed to send estimate {} to {}: {err}",
            prepared.estimate_id,
            prepared.email.to
        );
        ServiceError::Mailer(err.to_string())
    })?;

    // The email is already out at this point.
    let sent_at = Utc::now().naive_utc();
    if let Err(err) = repo.update_estimate_status(
        prepared.estimate_id,
        profile.id,
        EstimateStatus::Sent,
        Some(sent_at),
    ) {
        log::error!(
            "Estimate {} was emailed as {message_id} but could not be marked sent: {err}",
            prepared.estimate_id
        );
    }

    Ok(SendEstimateResponse {
        success: true,
        message_id,
    })
}
