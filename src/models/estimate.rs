use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::estimate::{
    Estimate as DomainEstimate, EstimateStatus, NewEstimate as DomainNewEstimate,
};
use crate::domain::types::{
    ClientId, EstimateId, EstimateTitle, Notes, ProfileId, ProjectId, TypeConstraintError,
};
use crate::models::{from_json_column, to_json_column};
use crate::pricing::{Complexity, Trade};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::estimates)]
/// Diesel model for [`crate::domain::estimate::Estimate`].
pub struct Estimate {
    pub id: i32,
    pub profile_id: i32,
    pub client_id: i32,
    pub project_id: Option<i32>,
    pub title: String,
    pub trade: String,
    pub complexity: String,
    pub measurements: String,
    pub addons: String,
    pub notes: Option<String>,
    pub breakdown: String,
    pub total: f64,
    pub low: f64,
    pub high: f64,
    pub status: String,
    pub sent_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::estimates)]
/// Insertable form of [`Estimate`]. New estimates always start as drafts.
pub struct NewEstimate<'a> {
    pub profile_id: i32,
    pub client_id: i32,
    pub project_id: Option<i32>,
    pub title: &'a str,
    pub trade: &'static str,
    pub complexity: &'static str,
    pub measurements: String,
    pub addons: String,
    pub notes: Option<&'a str>,
    pub breakdown: String,
    pub total: f64,
    pub low: f64,
    pub high: f64,
    pub status: &'static str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::estimates)]
/// Status transition applied to an [`Estimate`]. `sent_at` is left untouched
/// when `None`.
pub struct UpdateEstimateStatus {
    pub status: &'static str,
    pub sent_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Estimate> for DomainEstimate {
    type Error = TypeConstraintError;

    fn try_from(estimate: Estimate) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EstimateId::try_from(estimate.id)?,
            profile_id: ProfileId::try_from(estimate.profile_id)?,
            client_id: ClientId::try_from(estimate.client_id)?,
            project_id: estimate.project_id.map(ProjectId::try_from).transpose()?,
            title: EstimateTitle::new(estimate.title)?,
            trade: estimate
                .trade
                .parse::<Trade>()
                .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))?,
            complexity: estimate
                .complexity
                .parse::<Complexity>()
                .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))?,
            measurements: from_json_column("measurements", &estimate.measurements)?,
            addons: from_json_column("addons", &estimate.addons)?,
            notes: estimate.notes.map(Notes::new).transpose()?,
            breakdown: from_json_column("breakdown", &estimate.breakdown)?,
            total: estimate.total,
            low: estimate.low,
            high: estimate.high,
            status: estimate.status.parse::<EstimateStatus>()?,
            sent_at: estimate.sent_at,
            created_at: estimate.created_at,
            updated_at: estimate.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewEstimate> for NewEstimate<'a> {
    fn from(estimate: &'a DomainNewEstimate) -> Self {
        Self {
            profile_id: estimate.profile_id.get(),
            client_id: estimate.client_id.get(),
            project_id: estimate.project_id.map(ProjectId::get),
            title: estimate.title.as_str(),
            trade: estimate.trade().as_str(),
            complexity: estimate.complexity().as_str(),
            measurements: to_json_column(&estimate.measurements),
            addons: to_json_column(&estimate.addons),
            notes: estimate.notes.as_ref().map(|n| n.as_str()),
            breakdown: to_json_column(&estimate.breakdown),
            total: estimate.breakdown.total,
            low: estimate.breakdown.low,
            high: estimate.breakdown.high,
            status: EstimateStatus::Draft.as_str(),
        }
    }
}
