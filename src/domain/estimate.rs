use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClientId, EstimateId, EstimateTitle, Notes, ProfileId, ProjectId, TypeConstraintError,
};
use crate::pricing::{AddonLine, Complexity, EstimateBreakdown, Measurements, Trade};

/// Lifecycle of an estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Declined,
}

impl EstimateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EstimateStatus::Draft => "draft",
            EstimateStatus::Sent => "sent",
            EstimateStatus::Accepted => "accepted",
            EstimateStatus::Declined => "declined",
        }
    }

    /// Whether an explicit status update may move the estimate to `next`.
    /// `Sent` is only reachable by emailing the estimate.
    pub fn can_update_to(self, next: EstimateStatus) -> bool {
        match next {
            EstimateStatus::Draft => true,
            EstimateStatus::Sent => false,
            EstimateStatus::Accepted | EstimateStatus::Declined => self == EstimateStatus::Sent,
        }
    }

    /// Drafts and already sent estimates may be (re)sent.
    pub fn can_send(self) -> bool {
        matches!(self, EstimateStatus::Draft | EstimateStatus::Sent)
    }
}

impl Display for EstimateStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstimateStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(EstimateStatus::Draft),
            "sent" => Ok(EstimateStatus::Sent),
            "accepted" => Ok(EstimateStatus::Accepted),
            "declined" => Ok(EstimateStatus::Declined),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown estimate status `{other}`"
            ))),
        }
    }
}

/// A priced quote for a client job.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Estimate {
    pub id: EstimateId,
    pub profile_id: ProfileId,
    pub client_id: ClientId,
    pub project_id: Option<ProjectId>,
    pub title: EstimateTitle,
    pub trade: Trade,
    pub complexity: Complexity,
    pub measurements: Measurements,
    pub addons: Vec<AddonLine>,
    pub notes: Option<Notes>,
    /// Snapshot of the pricing at creation time.
    pub breakdown: EstimateBreakdown,
    pub total: f64,
    pub low: f64,
    pub high: f64,
    pub status: EstimateStatus,
    pub sent_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Estimate {
    /// Reference printed on emails and documents.
    pub fn number(&self) -> String {
        format!("EST-{:05}", self.id.get())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewEstimate {
    pub profile_id: ProfileId,
    pub client_id: ClientId,
    pub project_id: Option<ProjectId>,
    pub title: EstimateTitle,
    pub measurements: Measurements,
    pub addons: Vec<AddonLine>,
    pub notes: Option<Notes>,
    pub breakdown: EstimateBreakdown,
}

impl NewEstimate {
    pub fn trade(&self) -> Trade {
        self.breakdown.trade
    }

    pub fn complexity(&self) -> Complexity {
        self.breakdown.complexity
    }
}
