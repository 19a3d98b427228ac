//! Per-contractor pricing settings of a trade.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::ProfileId;
use crate::pricing::{PricingSettings, Trade};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TradePricingSettings {
    pub profile_id: ProfileId,
    pub trade: Trade,
    #[serde(flatten)]
    pub settings: PricingSettings,
    /// `None` while the contractor still uses the defaults.
    pub updated_at: Option<NaiveDateTime>,
}

impl TradePricingSettings {
    /// Default settings for a contractor that never saved any.
    pub fn defaults(profile_id: ProfileId, trade: Trade) -> Self {
        Self {
            profile_id,
            trade,
            settings: PricingSettings::default(),
            updated_at: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTradePricingSettings {
    pub profile_id: ProfileId,
    pub trade: Trade,
    pub settings: PricingSettings,
}
