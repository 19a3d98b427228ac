use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::project::{
    NewProject as DomainNewProject, Project as DomainProject, UpdateProject as DomainUpdateProject,
};
use crate::domain::types::{
    ClientId, Notes, ProfileId, ProjectId, ProjectName, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::projects)]
pub struct Project {
    pub id: i32,
    pub profile_id: i32,
    pub client_id: i32,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::projects)]
pub struct NewProject<'a> {
    pub profile_id: i32,
    pub client_id: i32,
    pub name: &'a str,
    pub address: Option<&'a str>,
    pub description: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProject<'a> {
    pub name: &'a str,
    pub address: Option<&'a str>,
    pub description: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Project> for DomainProject {
    type Error = TypeConstraintError;

    fn try_from(project: Project) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProjectId::try_from(project.id)?,
            profile_id: ProfileId::try_from(project.profile_id)?,
            client_id: ClientId::try_from(project.client_id)?,
            name: ProjectName::new(project.name)?,
            address: project.address,
            description: project.description.map(Notes::new).transpose()?,
            created_at: project.created_at,
            updated_at: project.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProject> for NewProject<'a> {
    fn from(project: &'a DomainNewProject) -> Self {
        Self {
            profile_id: project.profile_id.get(),
            client_id: project.client_id.get(),
            name: project.name.as_str(),
            address: project.address.as_deref(),
            description: project.description.as_ref().map(|d| d.as_str()),
        }
    }
}

impl<'a> UpdateProject<'a> {
    pub fn new(project: &'a DomainUpdateProject, updated_at: NaiveDateTime) -> Self {
        Self {
            name: project.name.as_str(),
            address: project.address.as_deref(),
            description: project.description.as_ref().map(|d| d.as_str()),
            updated_at,
        }
    }
}
