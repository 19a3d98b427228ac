use std::collections::BTreeMap;

use serde::Deserialize;
use validator::Validate;

use crate::domain::pricing_settings::NewTradePricingSettings;
use crate::domain::types::ProfileId;
use crate::forms::FormError;
use crate::pricing::{DEFAULT_RANGE_PERCENT, PricingSettings, Trade};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Replacement pricing settings for one trade. Omitted rates fall back to
/// the trade defaults.
pub struct PricingSettingsForm {
    #[serde(default)]
    pub rates: BTreeMap<String, f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 50.0, message = "Range must be between 0 and 50 percent"))]
    pub range_percent: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Minimum charge cannot be negative"))]
    pub minimum_charge: Option<f64>,
}

impl PricingSettingsForm {
    pub fn into_settings(
        self,
        profile_id: ProfileId,
        trade: Trade,
    ) -> Result<NewTradePricingSettings, FormError> {
        self.validate()?;
        let settings = PricingSettings {
            rates: self.rates.into_iter().collect(),
            range_percent: self.range_percent.unwrap_or(DEFAULT_RANGE_PERCENT),
            minimum_charge: self.minimum_charge.unwrap_or_default(),
        };
        settings.validate(trade)?;
        Ok(NewTradePricingSettings {
            profile_id,
            trade,
            settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingError;

    fn profile() -> ProfileId {
        ProfileId::new(1).unwrap()
    }

    #[test]
    fn missing_values_use_defaults() {
        let settings = PricingSettingsForm::default()
            .into_settings(profile(), Trade::Painting)
            .unwrap();
        assert_eq!(settings.settings, PricingSettings::default());
    }

    #[test]
    fn rates_are_checked_against_trade() {
        let form = PricingSettingsForm {
            rates: [("frame_wall".to_string(), 12.0)].into_iter().collect(),
            ..PricingSettingsForm::default()
        };
        assert!(matches!(
            form.into_settings(profile(), Trade::Painting),
            Err(FormError::Pricing(PricingError::UnknownRate { .. }))
        ));
    }

    #[test]
    fn range_above_limit_is_rejected() {
        let form = PricingSettingsForm {
            range_percent: Some(60.0),
            ..PricingSettingsForm::default()
        };
        assert!(matches!(
            form.into_settings(profile(), Trade::Framing),
            Err(FormError::Validation(_))
        ));
    }
}
