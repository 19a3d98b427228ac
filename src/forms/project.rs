use serde::Deserialize;
use validator::Validate;

use crate::domain::project::{NewProject, UpdateProject};
use crate::domain::types::{ClientId, ProfileId};
use crate::forms::FormError;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProjectForm {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

impl ProjectForm {
    pub fn into_new_project(
        self,
        profile_id: ProfileId,
        client_id: ClientId,
    ) -> Result<NewProject, FormError> {
        self.validate()?;
        Ok(NewProject::try_new(
            profile_id,
            client_id,
            self.name,
            self.address,
            self.description,
        )?)
    }

    pub fn into_update(self) -> Result<UpdateProject, FormError> {
        self.validate()?;
        Ok(UpdateProject::try_new(
            self.name,
            self.address,
            self.description,
        )?)
    }
}
