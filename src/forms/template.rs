use serde::Deserialize;
use validator::Validate;

use crate::domain::template::NewTemplate;
use crate::domain::types::{ProfileId, TemplateName};
use crate::forms::FormError;
use crate::pricing::{AddonLine, Complexity, Measurements, Trade};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TemplateForm {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    pub trade: String,
    #[serde(default)]
    pub complexity: Option<String>,
    #[serde(default)]
    pub measurements: Measurements,
    #[serde(default)]
    pub addons: Vec<AddonLine>,
}

impl TemplateForm {
    pub fn into_new_template(self, profile_id: ProfileId) -> Result<NewTemplate, FormError> {
        self.validate()?;
        let trade = self.trade.parse::<Trade>()?;
        let complexity = self
            .complexity
            .as_deref()
            .map(str::parse::<Complexity>)
            .transpose()?
            .unwrap_or_default();
        self.measurements.validate(trade)?;
        for addon in &self.addons {
            addon.validate()?;
        }

        Ok(NewTemplate {
            profile_id,
            name: TemplateName::new(self.name)?,
            trade,
            complexity,
            measurements: self.measurements,
            addons: self.addons,
        })
    }
}
