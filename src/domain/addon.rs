//! Contractor's catalog of optional line items.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AddonId, AddonName, Amount, Notes, ProfileId};
use crate::pricing::{AddonLine, AddonPricing};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Addon {
    pub id: AddonId,
    pub profile_id: ProfileId,
    pub name: AddonName,
    pub pricing: AddonPricing,
    pub unit_price: Amount,
    pub description: Option<Notes>,
    pub created_at: NaiveDateTime,
}

impl Addon {
    /// Snapshot of the addon as an estimate line.
    pub fn to_line(&self, quantity: Option<f64>) -> AddonLine {
        AddonLine {
            name: self.name.as_str().to_string(),
            pricing: self.pricing,
            unit_price: self.unit_price.get(),
            quantity,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAddon {
    pub profile_id: ProfileId,
    pub name: AddonName,
    pub pricing: AddonPricing,
    pub unit_price: Amount,
    pub description: Option<Notes>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateAddon {
    pub name: AddonName,
    pub pricing: AddonPricing,
    pub unit_price: Amount,
    pub description: Option<Notes>,
}
