//! Domain aggregates exposed by the estimating service layer.

pub mod addon;
pub mod client;
pub mod estimate;
pub mod pricing_settings;
pub mod profile;
pub mod project;
pub mod template;
pub mod types;

/// Trims optional free text, turning blank input into `None`.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
