//! Estimate pricing engine.
//!
//! Pure arithmetic over measured quantities, per-contractor rate overrides
//! and a complexity tier. The engine never touches storage; callers load the
//! contractor's [`PricingSettings`] and pass them in.
//!
//! The calculation is:
//!
//! 1. every rate is charged on the sum of the quantities it applies to,
//!    using the contractor override when present;
//! 2. the labor subtotal is scaled by the [`Complexity`] multiplier
//!    (materials are not);
//! 3. addons are added;
//! 4. the contractor's minimum charge is enforced;
//! 5. a low/high range is spread around the total by `range_percent`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod addon;
pub mod complexity;
pub mod trade;

pub use addon::{AddonCharge, AddonLine, AddonPricing};
pub use complexity::Complexity;
pub use trade::{CostKind, QuantityDefinition, RateDefinition, Trade, TradeSchedule, Unit};

pub const DEFAULT_RANGE_PERCENT: f64 = 10.0;
pub const MAX_RANGE_PERCENT: f64 = 50.0;

/// Errors produced while validating pricing inputs.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("unknown trade `{0}`")]
    UnknownTrade(String),
    #[error("unknown complexity `{0}`")]
    UnknownComplexity(String),
    #[error("unknown addon pricing `{0}`")]
    UnknownAddonPricing(String),
    #[error("unknown quantity `{key}` for {trade}")]
    UnknownQuantity { trade: Trade, key: String },
    #[error("quantity `{0}` must be a finite, non-negative number")]
    InvalidQuantity(String),
    #[error("at least one quantity must be greater than zero")]
    EmptyMeasurements,
    #[error("unknown rate `{key}` for {trade}")]
    UnknownRate { trade: Trade, key: String },
    #[error("rate `{0}` must be a finite, non-negative number")]
    InvalidRate(String),
    #[error("range percent must be between 0 and 50")]
    InvalidRangePercent,
    #[error("minimum charge must be a finite, non-negative number")]
    InvalidMinimumCharge,
    #[error("addon `{0}` has an invalid name, price or quantity")]
    InvalidAddon(String),
    #[error("estimate amounts are too large to price")]
    AmountOutOfRange,
}

/// Rounds half away from zero to whole cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Measured quantities keyed by the trade's quantity keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Measurements(BTreeMap<String, f64>);

impl Measurements {
    pub fn new(values: BTreeMap<String, f64>) -> Self {
        Self(values)
    }

    pub fn get(&self, key: &str) -> f64 {
        self.0.get(key).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    /// Checks the keys belong to `trade` and at least one quantity is positive.
    pub fn validate(&self, trade: Trade) -> Result<(), PricingError> {
        for (key, value) in &self.0 {
            if trade.quantity(key).is_none() {
                return Err(PricingError::UnknownQuantity {
                    trade,
                    key: key.clone(),
                });
            }
            if !value.is_finite() || *value < 0.0 {
                return Err(PricingError::InvalidQuantity(key.clone()));
            }
        }
        if !self.0.values().any(|v| *v > 0.0) {
            return Err(PricingError::EmptyMeasurements);
        }
        Ok(())
    }

    fn total_in(&self, trade: Trade, unit: Unit) -> f64 {
        trade
            .quantities()
            .iter()
            .filter(|q| q.unit == unit)
            .map(|q| self.get(q.key))
            .sum()
    }
}

impl FromIterator<(String, f64)> for Measurements {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Contractor overrides of the default rates of one trade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateOverrides(BTreeMap<String, f64>);

impl RateOverrides {
    pub fn new(values: BTreeMap<String, f64>) -> Self {
        Self(values)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    pub fn validate(&self, trade: Trade) -> Result<(), PricingError> {
        for (key, value) in &self.0 {
            if trade.rate(key).is_none() {
                return Err(PricingError::UnknownRate {
                    trade,
                    key: key.clone(),
                });
            }
            if !value.is_finite() || *value < 0.0 {
                return Err(PricingError::InvalidRate(key.clone()));
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, f64)> for RateOverrides {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Contractor pricing preferences for one trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default)]
    pub rates: RateOverrides,
    #[serde(default = "default_range_percent")]
    pub range_percent: f64,
    #[serde(default)]
    pub minimum_charge: f64,
}

fn default_range_percent() -> f64 {
    DEFAULT_RANGE_PERCENT
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            rates: RateOverrides::default(),
            range_percent: DEFAULT_RANGE_PERCENT,
            minimum_charge: 0.0,
        }
    }
}

impl PricingSettings {
    pub fn validate(&self, trade: Trade) -> Result<(), PricingError> {
        self.rates.validate(trade)?;
        if !self.range_percent.is_finite()
            || !(0.0..=MAX_RANGE_PERCENT).contains(&self.range_percent)
        {
            return Err(PricingError::InvalidRangePercent);
        }
        if !self.minimum_charge.is_finite() || self.minimum_charge < 0.0 {
            return Err(PricingError::InvalidMinimumCharge);
        }
        Ok(())
    }

    /// Rate actually charged: the override when set, otherwise the default.
    pub fn effective_rate(&self, rate: &RateDefinition) -> f64 {
        self.rates.get(rate.key).unwrap_or(rate.default)
    }
}

/// One priced rate of the trade schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub key: String,
    pub label: String,
    pub unit: Unit,
    pub kind: CostKind,
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64,
}

/// Complete, reproducible result of pricing an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateBreakdown {
    pub trade: Trade,
    pub complexity: Complexity,
    pub multiplier: f64,
    pub line_items: Vec<LineItem>,
    pub labor_subtotal: f64,
    pub adjusted_labor: f64,
    pub materials_subtotal: f64,
    pub addons: Vec<AddonCharge>,
    pub addons_total: f64,
    pub minimum_applied: bool,
    pub total: f64,
    pub low: f64,
    pub high: f64,
}

impl EstimateBreakdown {
    fn is_finite(&self) -> bool {
        let lines = self
            .line_items
            .iter()
            .flat_map(|item| [item.quantity, item.rate, item.amount]);
        let addons = self
            .addons
            .iter()
            .flat_map(|addon| [addon.quantity, addon.unit_price, addon.amount]);
        let totals = [
            self.labor_subtotal,
            self.adjusted_labor,
            self.materials_subtotal,
            self.addons_total,
            self.total,
            self.low,
            self.high,
        ];
        lines.chain(addons).chain(totals).all(f64::is_finite)
    }
}

/// Everything needed to price an estimate.
#[derive(Debug, Clone, Copy)]
pub struct PricingInput<'a> {
    pub trade: Trade,
    pub measurements: &'a Measurements,
    pub complexity: Complexity,
    pub addons: &'a [AddonLine],
    pub settings: &'a PricingSettings,
}

/// Prices an estimate.
pub fn calculate(input: PricingInput<'_>) -> Result<EstimateBreakdown, PricingError> {
    let PricingInput {
        trade,
        measurements,
        complexity,
        addons,
        settings,
    } = input;

    measurements.validate(trade)?;
    settings.validate(trade)?;
    for addon in addons {
        addon.validate()?;
    }

    let line_items = trade
        .rates()
        .iter()
        .filter_map(|rate| {
            let quantity: f64 = rate.applies_to.iter().map(|k| measurements.get(k)).sum();
            if quantity <= 0.0 {
                return None;
            }
            let unit_rate = settings.effective_rate(rate);
            Some(LineItem {
                key: rate.key.to_string(),
                label: rate.label.to_string(),
                unit: rate.unit,
                kind: rate.kind,
                quantity,
                rate: unit_rate,
                amount: round_cents(quantity * unit_rate),
            })
        })
        .collect::<Vec<_>>();

    let subtotal_of = |kind: CostKind| {
        round_cents(
            line_items
                .iter()
                .filter(|item| item.kind == kind)
                .map(|item| item.amount)
                .sum(),
        )
    };
    let labor_subtotal = subtotal_of(CostKind::Labor);
    let materials_subtotal = subtotal_of(CostKind::Material);

    let multiplier = complexity.multiplier();
    let adjusted_labor = round_cents(labor_subtotal * multiplier);

    let total_sqft = measurements.total_in(trade, Unit::SquareFoot);
    let total_linear_ft = measurements.total_in(trade, Unit::LinearFoot);
    let addon_charges = addons
        .iter()
        .map(|addon| addon.charge(total_sqft, total_linear_ft))
        .collect::<Vec<_>>();
    let addons_total = round_cents(addon_charges.iter().map(|a| a.amount).sum());

    let subtotal = round_cents(adjusted_labor + materials_subtotal + addons_total);
    let minimum_applied = subtotal < settings.minimum_charge;
    let total = if minimum_applied {
        round_cents(settings.minimum_charge)
    } else {
        subtotal
    };

    let spread = settings.range_percent / 100.0;
    let low = round_cents(total * (1.0 - spread));
    let high = round_cents(total * (1.0 + spread));

    let breakdown = EstimateBreakdown {
        trade,
        complexity,
        multiplier,
        line_items,
        labor_subtotal,
        adjusted_labor,
        materials_subtotal,
        addons: addon_charges,
        addons_total,
        minimum_applied,
        total,
        low,
        high,
    };

    // Non-finite values cannot be stored in the JSON breakdown column.
    if !breakdown.is_finite() {
        return Err(PricingError::AmountOutOfRange);
    }
    Ok(breakdown)
}
