use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::normalize_optional;
use crate::domain::types::{ClientId, Notes, ProfileId, ProjectId, ProjectName, TypeConstraintError};

/// Job site belonging to a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub profile_id: ProfileId,
    pub client_id: ClientId,
    pub name: ProjectName,
    pub address: Option<String>,
    pub description: Option<Notes>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProject {
    pub profile_id: ProfileId,
    pub client_id: ClientId,
    pub name: ProjectName,
    pub address: Option<String>,
    pub description: Option<Notes>,
}

impl NewProject {
    pub fn try_new(
        profile_id: ProfileId,
        client_id: ClientId,
        name: impl Into<String>,
        address: Option<String>,
        description: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            profile_id,
            client_id,
            name: ProjectName::new(name)?,
            address: normalize_optional(address),
            description: Notes::from_optional(description),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateProject {
    pub name: ProjectName,
    pub address: Option<String>,
    pub description: Option<Notes>,
}

impl UpdateProject {
    pub fn try_new(
        name: impl Into<String>,
        address: Option<String>,
        description: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: ProjectName::new(name)?,
            address: normalize_optional(address),
            description: Notes::from_optional(description),
        })
    }
}
