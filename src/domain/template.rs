//! Saved wizard presets.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ProfileId, TemplateId, TemplateName};
use crate::pricing::{AddonLine, Complexity, Measurements, Trade};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Template {
    pub id: TemplateId,
    pub profile_id: ProfileId,
    pub name: TemplateName,
    pub trade: Trade,
    pub complexity: Complexity,
    pub measurements: Measurements,
    pub addons: Vec<AddonLine>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTemplate {
    pub profile_id: ProfileId,
    pub name: TemplateName,
    pub trade: Trade,
    pub complexity: Complexity,
    pub measurements: Measurements,
    pub addons: Vec<AddonLine>,
}
