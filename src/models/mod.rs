//! Database models shared across the estimating repository.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::types::TypeConstraintError;

pub mod addon;
pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod estimate;
pub mod pricing_settings;
pub mod profile;
pub mod project;
pub mod template;

/// Decodes a JSON text column.
pub(crate) fn from_json_column<T: DeserializeOwned>(
    column: &str,
    raw: &str,
) -> Result<T, TypeConstraintError> {
    serde_json::from_str(raw)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("malformed `{column}` column: {e}")))
}

/// Encodes a value for a JSON text column.
pub(crate) fn to_json_column<T: Serialize>(value: &T) -> String {
    // `pricing::calculate` rejects non-finite amounts, so values always encode.
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}
