//! DTOs for the pricing settings endpoints.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::pricing_settings::TradePricingSettings;
use crate::pricing::{CostKind, RateDefinition, Trade, TradeSchedule, Unit};

/// One rate with its default and the value actually charged.
#[derive(Debug, Serialize)]
pub struct EffectiveRate {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: Unit,
    pub kind: CostKind,
    pub default: f64,
    pub value: f64,
    pub overridden: bool,
}

/// Pricing settings of one trade as the contractor sees them.
#[derive(Debug, Serialize)]
pub struct TradeSettingsView {
    pub trade: Trade,
    pub label: &'static str,
    pub rates: Vec<EffectiveRate>,
    pub range_percent: f64,
    pub minimum_charge: f64,
    /// `None` until the contractor saves settings for the trade.
    pub updated_at: Option<NaiveDateTime>,
}

impl From<TradePricingSettings> for TradeSettingsView {
    fn from(stored: TradePricingSettings) -> Self {
        let TradeSchedule { trade, label, rates, .. } = stored.trade.schedule();
        let rates = rates
            .iter()
            .map(|rate: &RateDefinition| EffectiveRate {
                key: rate.key,
                label: rate.label,
                unit: rate.unit,
                kind: rate.kind,
                default: rate.default,
                value: stored.settings.effective_rate(rate),
                overridden: stored.settings.rates.get(rate.key).is_some(),
            })
            .collect();

        Self {
            trade,
            label,
            rates,
            range_percent: stored.settings.range_percent,
            minimum_charge: stored.settings.minimum_charge,
            updated_at: stored.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ProfileId;

    #[test]
    fn view_marks_overridden_rates() {
        let mut stored =
            TradePricingSettings::defaults(ProfileId::new(1).unwrap(), Trade::Painting);
        stored.settings.rates = [("paint_door".to_string(), 90.0)].into_iter().collect();

        let view = TradeSettingsView::from(stored);
        let door = view.rates.iter().find(|r| r.key == "paint_door").unwrap();
        assert!(door.overridden);
        assert_eq!(door.value, 90.0);
        assert_eq!(door.default, 75.0);

        let wall = view.rates.iter().find(|r| r.key == "paint_wall").unwrap();
        assert!(!wall.overridden);
        assert_eq!(wall.value, wall.default);
    }
}
