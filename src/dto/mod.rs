//! DTOs that bridge services with the JSON API.

pub mod client;
pub mod estimate;
pub mod settings;
pub mod templates;
