//! Trade rate schedules.
//!
//! Each trade declares the quantities a contractor measures on site and the
//! rates applied to them. Rates reference quantities by key; a rate applied
//! to several quantities is charged on their sum.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pricing::PricingError;

/// Category of construction work with its own rate schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trade {
    DrywallHanging,
    DrywallFinishing,
    Painting,
    Framing,
}

/// Unit a quantity is measured in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "sqft")]
    SquareFoot,
    #[serde(rename = "linear_ft")]
    LinearFoot,
    #[serde(rename = "each")]
    Each,
}

impl Unit {
    /// Short suffix printed after quantities.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Unit::SquareFoot => "sq ft",
            Unit::LinearFoot => "lin ft",
            Unit::Each => "ea",
        }
    }
}

/// Whether a line is scaled by the complexity multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostKind {
    Labor,
    Material,
}

/// A measured input of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantityDefinition {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: Unit,
}

/// A rate of a trade and the quantities it is charged on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateDefinition {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: Unit,
    pub kind: CostKind,
    pub default: f64,
    pub applies_to: &'static [&'static str],
}

const fn quantity(key: &'static str, label: &'static str, unit: Unit) -> QuantityDefinition {
    QuantityDefinition { key, label, unit }
}

const fn rate(
    key: &'static str,
    label: &'static str,
    unit: Unit,
    kind: CostKind,
    default: f64,
    applies_to: &'static [&'static str],
) -> RateDefinition {
    RateDefinition {
        key,
        label,
        unit,
        kind,
        default,
        applies_to,
    }
}

use CostKind::{Labor, Material};
use Unit::{Each, LinearFoot, SquareFoot};

#[rustfmt::skip]
const HANGING_QUANTITIES: &[QuantityDefinition] = &[
    quantity("wall_sqft", "Wall area", SquareFoot),
    quantity("ceiling_sqft", "Ceiling area", SquareFoot),
];

#[rustfmt::skip]
const HANGING_RATES: &[RateDefinition] = &[
    rate("hang_wall", "Hang walls", SquareFoot, Labor, 0.55, &["wall_sqft"]),
    rate("hang_ceiling", "Hang ceilings", SquareFoot, Labor, 0.70, &["ceiling_sqft"]),
    rate("board", "Drywall board", SquareFoot, Material, 0.45, &["wall_sqft", "ceiling_sqft"]),
];

#[rustfmt::skip]
const FINISHING_QUANTITIES: &[QuantityDefinition] = &[
    quantity("wall_sqft", "Wall area", SquareFoot),
    quantity("ceiling_sqft", "Ceiling area", SquareFoot),
    quantity("corner_bead_lf", "Corner bead", LinearFoot),
];

#[rustfmt::skip]
const FINISHING_RATES: &[RateDefinition] = &[
    rate("finish_wall", "Tape and finish walls", SquareFoot, Labor, 0.65, &["wall_sqft"]),
    rate("finish_ceiling", "Tape and finish ceilings", SquareFoot, Labor, 0.80, &["ceiling_sqft"]),
    rate("corner_bead", "Install corner bead", LinearFoot, Labor, 1.50, &["corner_bead_lf"]),
    rate("compound", "Joint compound and tape", SquareFoot, Material, 0.15,
         &["wall_sqft", "ceiling_sqft"]),
];

#[rustfmt::skip]
const PAINTING_QUANTITIES: &[QuantityDefinition] = &[
    quantity("wall_sqft", "Wall area", SquareFoot),
    quantity("ceiling_sqft", "Ceiling area", SquareFoot),
    quantity("trim_lf", "Trim", LinearFoot),
    quantity("doors", "Doors", Each),
];

#[rustfmt::skip]
const PAINTING_RATES: &[RateDefinition] = &[
    rate("paint_wall", "Paint walls", SquareFoot, Labor, 1.25, &["wall_sqft"]),
    rate("paint_ceiling", "Paint ceilings", SquareFoot, Labor, 1.50, &["ceiling_sqft"]),
    rate("paint_trim", "Paint trim", LinearFoot, Labor, 1.75, &["trim_lf"]),
    rate("paint_door", "Paint doors", Each, Labor, 75.0, &["doors"]),
    rate("paint", "Paint and primer", SquareFoot, Material, 0.35, &["wall_sqft", "ceiling_sqft"]),
];

#[rustfmt::skip]
const FRAMING_QUANTITIES: &[QuantityDefinition] = &[
    quantity("wall_lf", "Wall length", LinearFoot),
    quantity("door_openings", "Door openings", Each),
    quantity("window_openings", "Window openings", Each),
];

#[rustfmt::skip]
const FRAMING_RATES: &[RateDefinition] = &[
    rate("frame_wall", "Frame walls", LinearFoot, Labor, 14.0, &["wall_lf"]),
    rate("frame_door", "Frame door openings", Each, Labor, 125.0, &["door_openings"]),
    rate("frame_window", "Frame window openings", Each, Labor, 150.0, &["window_openings"]),
    rate("lumber", "Studs, plates and fasteners", LinearFoot, Material, 9.50, &["wall_lf"]),
];

impl Trade {
    pub const ALL: [Trade; 4] = [
        Trade::DrywallHanging,
        Trade::DrywallFinishing,
        Trade::Painting,
        Trade::Framing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Trade::DrywallHanging => "drywall_hanging",
            Trade::DrywallFinishing => "drywall_finishing",
            Trade::Painting => "painting",
            Trade::Framing => "framing",
        }
    }

    /// Human readable trade name.
    pub fn label(self) -> &'static str {
        match self {
            Trade::DrywallHanging => "Drywall hanging",
            Trade::DrywallFinishing => "Drywall finishing",
            Trade::Painting => "Painting",
            Trade::Framing => "Framing",
        }
    }

    pub fn quantities(self) -> &'static [QuantityDefinition] {
        match self {
            Trade::DrywallHanging => HANGING_QUANTITIES,
            Trade::DrywallFinishing => FINISHING_QUANTITIES,
            Trade::Painting => PAINTING_QUANTITIES,
            Trade::Framing => FRAMING_QUANTITIES,
        }
    }

    pub fn rates(self) -> &'static [RateDefinition] {
        match self {
            Trade::DrywallHanging => HANGING_RATES,
            Trade::DrywallFinishing => FINISHING_RATES,
            Trade::Painting => PAINTING_RATES,
            Trade::Framing => FRAMING_RATES,
        }
    }

    pub fn quantity(self, key: &str) -> Option<&'static QuantityDefinition> {
        self.quantities().iter().find(|q| q.key == key)
    }

    pub fn rate(self, key: &str) -> Option<&'static RateDefinition> {
        self.rates().iter().find(|r| r.key == key)
    }

    /// Default value of a rate, `None` when the trade has no such rate.
    pub fn default_rate(self, key: &str) -> Option<f64> {
        self.rate(key).map(|r| r.default)
    }

    /// Full schedule used by the settings screen.
    pub fn schedule(self) -> TradeSchedule {
        TradeSchedule {
            trade: self,
            label: self.label(),
            quantities: self.quantities(),
            rates: self.rates(),
        }
    }
}

/// Serializable view of a trade's quantities and default rates.
#[derive(Debug, Clone, Serialize)]
pub struct TradeSchedule {
    pub trade: Trade,
    pub label: &'static str,
    pub quantities: &'static [QuantityDefinition],
    pub rates: &'static [RateDefinition],
}

impl Display for Trade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trade {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Trade::ALL
            .into_iter()
            .find(|trade| trade.as_str() == s)
            .ok_or_else(|| PricingError::UnknownTrade(s.to_string()))
    }
}
