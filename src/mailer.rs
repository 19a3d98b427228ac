//! Outbound email delivery.
//!
//! Estimates are emailed through a third-party HTTP mail provider. When no
//! API key is configured the [`LogMailer`] is used instead and messages are
//! only written to the log.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tera::Tera;
use thiserror::Error;

use crate::models::config::MailConfig;

/// Name under which the estimate email body is registered.
pub const ESTIMATE_EMAIL_TEMPLATE: &str = "email/estimate.html";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("mail provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub html: String,
    pub reply_to: Option<String>,
    pub attachments: Vec<Attachment>,
}

#[async_trait]
pub trait EstimateMailer: Send + Sync {
    /// Hands the email to the provider and returns its message id.
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailerError>;
}

#[derive(Serialize)]
struct ProviderAttachment<'a> {
    filename: &'a str,
    content: String,
    content_type: &'a str,
}

#[derive(Serialize)]
struct ProviderRequest<'a> {
    from: String,
    to: Vec<String>,
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    attachments: Vec<ProviderAttachment<'a>>,
}

#[derive(Deserialize)]
struct ProviderResponse {
    id: String,
}

fn mailbox(address: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{} <{address}>", name.replace(['<', '>', '"'], "")),
        None => address.to_string(),
    }
}

/// Client of a Resend-style `POST /emails` API.
#[derive(Clone)]
pub struct HttpMailer {
    client: Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(config: &MailConfig, api_key: &str) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/emails", config.api_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            from: mailbox(&config.from_address, Some(&config.from_name)),
        })
    }

    fn request_body<'a>(&self, email: &'a OutgoingEmail) -> ProviderRequest<'a> {
        ProviderRequest {
            from: self.from.clone(),
            to: vec![mailbox(&email.to, email.to_name.as_deref())],
            subject: &email.subject,
            html: &email.html,
            reply_to: email.reply_to.as_deref(),
            attachments: email
                .attachments
                .iter()
                .map(|a| ProviderAttachment {
                    filename: &a.filename,
                    content: STANDARD.encode(&a.content),
                    content_type: &a.content_type,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl EstimateMailer for HttpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(email))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let sent: ProviderResponse = response.json().await?;
        log::info!("Email `{}` accepted by provider as {}", email.subject, sent.id);
        Ok(sent.id)
    }
}

/// Writes emails to the log instead of sending them.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl EstimateMailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailerError> {
        let id = format!("logged-{}", chrono::Utc::now().timestamp_millis());
        log::info!(
            "Mail delivery disabled; would send `{}` to {} with {} attachment(s) [{id}]",
            email.subject,
            email.to,
            email.attachments.len()
        );
        Ok(id)
    }
}

/// Picks the mailer matching the configuration.
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn EstimateMailer>, MailerError> {
    match config.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => Ok(Arc::new(HttpMailer::new(config, key)?)),
        _ => {
            log::warn!("No mail API key configured, estimate emails will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

/// Email templates compiled into the binary.
pub fn email_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(
        ESTIMATE_EMAIL_TEMPLATE,
        include_str!("../templates/email/estimate.html"),
    )?;
    Ok(tera)
}
