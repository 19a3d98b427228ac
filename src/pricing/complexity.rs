use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pricing::PricingError;

/// Job difficulty tier applied to labor cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    #[default]
    Standard,
    Complex,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [
        Complexity::Simple,
        Complexity::Standard,
        Complexity::Complex,
    ];

    /// Scalar applied to the labor subtotal.
    pub fn multiplier(self) -> f64 {
        match self {
            Complexity::Simple => 1.0,
            Complexity::Standard => 1.15,
            Complexity::Complex => 1.35,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Standard => "standard",
            Complexity::Complex => "complex",
        }
    }
}

impl Display for Complexity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Complexity::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PricingError::UnknownComplexity(s.to_string()))
    }
}
