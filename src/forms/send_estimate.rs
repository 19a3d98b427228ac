//! Payload of `POST /api/send-estimate`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::domain::normalize_optional;
use crate::domain::types::{EmailAddress, EstimateId};
use crate::forms::FormError;

/// Largest PDF accepted as an attachment.
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// How much of the estimate is written into the email body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    /// Price range and total only.
    #[default]
    Summary,
    /// Adds every line item and addon.
    Detailed,
}

impl std::str::FromStr for DetailLevel {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(DetailLevel::Summary),
            "detailed" => Ok(DetailLevel::Detailed),
            other => Err(FormError::InvalidDetailLevel(other.to_string())),
        }
    }
}

/// Raw request body. Every field is optional so that missing values are
/// reported as such instead of as a JSON decoding failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendEstimateForm {
    #[serde(default)]
    pub estimate_id: Option<i32>,
    #[serde(default)]
    pub recipient_email: Option<String>,
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail_level: Option<String>,
    #[serde(default)]
    pub pdf_base64: Option<String>,
    #[serde(default)]
    pub pdf_filename: Option<String>,
}

/// Send request whose fields have been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct SendEstimatePayload {
    pub estimate_id: EstimateId,
    pub recipient_email: EmailAddress,
    pub recipient_name: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub detail_level: DetailLevel,
    pub pdf: Vec<u8>,
    pub pdf_filename: String,
}

impl TryFrom<SendEstimateForm> for SendEstimatePayload {
    type Error = FormError;

    fn try_from(form: SendEstimateForm) -> Result<Self, Self::Error> {
        let (Some(estimate_id), Some(recipient_email), Some(pdf_base64)) = (
            form.estimate_id,
            normalize_optional(form.recipient_email),
            normalize_optional(form.pdf_base64),
        ) else {
            return Err(FormError::MissingFields);
        };

        let estimate_id = EstimateId::new(estimate_id).map_err(|_| FormError::MissingFields)?;
        let recipient_email =
            EmailAddress::new(recipient_email).map_err(|_| FormError::InvalidEmail)?;
        let detail_level = normalize_optional(form.detail_level)
            .map(|level| level.to_ascii_lowercase().parse::<DetailLevel>())
            .transpose()?
            .unwrap_or_default();
        let pdf = decode_pdf(&pdf_base64)?;
        let pdf_filename = normalize_optional(form.pdf_filename)
            .map(|name| sanitize_filename(&name))
            .filter(|name| name != ".pdf")
            .unwrap_or_else(|| format!("estimate-{}.pdf", estimate_id.get()));

        Ok(Self {
            estimate_id,
            recipient_email,
            recipient_name: normalize_optional(form.recipient_name),
            subject: normalize_optional(form.subject),
            message: normalize_optional(form.message),
            detail_level,
            pdf,
            pdf_filename,
        })
    }
}

/// Decodes base64 PDF content, accepting an optional data URL prefix.
fn decode_pdf(encoded: &str) -> Result<Vec<u8>, FormError> {
    let encoded = match encoded.split_once(',') {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };
    let compact = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect::<String>();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|_| FormError::InvalidPdf)?;
    if bytes.len() > MAX_PDF_BYTES {
        return Err(FormError::PdfTooLarge(MAX_PDF_BYTES));
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(FormError::InvalidPdf);
    }
    Ok(bytes)
}

/// Keeps a safe file name ending in `.pdf`.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let mut cleaned = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' '))
        .collect::<String>()
        .trim()
        .replace(' ', "-");
    if !cleaned.to_ascii_lowercase().ends_with(".pdf") {
        cleaned.push_str(".pdf");
    }
    cleaned
}
