//! Optional line items added on top of the trade work.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pricing::{PricingError, round_cents};

/// How an addon price scales.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddonPricing {
    Flat,
    PerSqft,
    PerLinearFt,
    PerEach,
}

impl AddonPricing {
    pub const ALL: [AddonPricing; 4] = [
        AddonPricing::Flat,
        AddonPricing::PerSqft,
        AddonPricing::PerLinearFt,
        AddonPricing::PerEach,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AddonPricing::Flat => "flat",
            AddonPricing::PerSqft => "per_sqft",
            AddonPricing::PerLinearFt => "per_linear_ft",
            AddonPricing::PerEach => "per_each",
        }
    }
}

impl Display for AddonPricing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddonPricing {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddonPricing::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PricingError::UnknownAddonPricing(s.to_string()))
    }
}

/// Addon selected for an estimate. When `quantity` is omitted it is derived
/// from the measurements (per sqft / per linear ft) or defaults to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonLine {
    pub name: String,
    pub pricing: AddonPricing,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

/// Priced addon as it appears in a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonCharge {
    pub name: String,
    pub pricing: AddonPricing,
    pub quantity: f64,
    pub unit_price: f64,
    pub amount: f64,
}

impl AddonLine {
    pub fn validate(&self) -> Result<(), PricingError> {
        let name_ok = !self.name.trim().is_empty();
        let price_ok = self.unit_price.is_finite() && self.unit_price >= 0.0;
        let quantity_ok = self.quantity.is_none_or(|q| q.is_finite() && q >= 0.0);
        if name_ok && price_ok && quantity_ok {
            Ok(())
        } else {
            Err(PricingError::InvalidAddon(self.name.clone()))
        }
    }

    /// Prices the addon given the measured area and length of the job.
    pub(crate) fn charge(&self, total_sqft: f64, total_linear_ft: f64) -> AddonCharge {
        let quantity = match self.pricing {
            AddonPricing::Flat => 1.0,
            AddonPricing::PerSqft => self.quantity.unwrap_or(total_sqft),
            AddonPricing::PerLinearFt => self.quantity.unwrap_or(total_linear_ft),
            AddonPricing::PerEach => self.quantity.unwrap_or(1.0),
        };

        AddonCharge {
            name: self.name.trim().to_string(),
            pricing: self.pricing,
            quantity,
            unit_price: self.unit_price,
            amount: round_cents(self.unit_price * quantity),
        }
    }
}
