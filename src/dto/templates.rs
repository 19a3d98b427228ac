//! DTOs for the addon catalog and template endpoints.

use serde::Serialize;

use crate::domain::addon::Addon;
use crate::domain::template::Template;

#[derive(Debug, Serialize)]
pub struct AddonsResponse {
    pub addons: Vec<Addon>,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<Template>,
}
