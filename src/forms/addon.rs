use serde::Deserialize;
use validator::Validate;

use crate::domain::addon::{NewAddon, UpdateAddon};
use crate::domain::types::{AddonName, Amount, Notes, ProfileId};
use crate::forms::FormError;
use crate::pricing::AddonPricing;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddonForm {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    pub pricing: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub unit_price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<AddonForm> for UpdateAddon {
    type Error = FormError;

    fn try_from(form: AddonForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(UpdateAddon {
            name: AddonName::new(form.name)?,
            pricing: form.pricing.parse::<AddonPricing>()?,
            unit_price: Amount::new(form.unit_price)?,
            description: Notes::from_optional(form.description),
        })
    }
}

impl AddonForm {
    pub fn into_new_addon(self, profile_id: ProfileId) -> Result<NewAddon, FormError> {
        let UpdateAddon {
            name,
            pricing,
            unit_price,
            description,
        } = UpdateAddon::try_from(self)?;
        Ok(NewAddon {
            profile_id,
            name,
            pricing,
            unit_price,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingError;

    #[test]
    fn unknown_pricing_is_rejected() {
        let form = AddonForm {
            name: "Haul away".into(),
            pricing: "hourly".into(),
            unit_price: 50.0,
            description: None,
        };
        assert!(matches!(
            UpdateAddon::try_from(form),
            Err(FormError::Pricing(PricingError::UnknownAddonPricing(_)))
        ));
    }

    #[test]
    fn builds_new_addon() {
        let form = AddonForm {
            name: " Primer coat ".into(),
            pricing: "per_sqft".into(),
            unit_price: 0.3,
            description: Some("Stain blocking".into()),
        };
        let addon = form.into_new_addon(ProfileId::new(2).unwrap()).unwrap();
        assert_eq!(addon.name.as_str(), "Primer coat");
        assert_eq!(addon.pricing, AddonPricing::PerSqft);
        assert_eq!(addon.unit_price.get(), 0.3);
    }
}
