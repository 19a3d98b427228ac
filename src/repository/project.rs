use chrono::Utc;
use diesel::prelude::*;

use crate::domain::project::{NewProject, Project, UpdateProject};
use crate::domain::types::{ClientId, ProfileId, ProjectId};
use crate::models::project::{
    NewProject as DbNewProject, Project as DbProject, UpdateProject as DbUpdateProject,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProjectReader, ProjectWriter};

impl ProjectReader for DieselRepository {
    fn get_project_by_id(
        &self,
        id: ProjectId,
        profile_id: ProfileId,
    ) -> RepositoryResult<Option<Project>> {
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let db_project = projects::table
            .filter(projects::id.eq(id.get()))
            .filter(projects::profile_id.eq(profile_id.get()))
            .first::<DbProject>(&mut conn)
            .optional()?;

        Ok(db_project.map(Project::try_from).transpose()?)
    }

    fn list_projects(
        &self,
        client_id: ClientId,
        profile_id: ProfileId,
    ) -> RepositoryResult<Vec<Project>> {
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let projects = projects::table
            .filter(projects::client_id.eq(client_id.get()))
            .filter(projects::profile_id.eq(profile_id.get()))
            .order(projects::created_at.desc())
            .load::<DbProject>(&mut conn)?
            .into_iter()
            .map(Project::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(projects)
    }
}

impl ProjectWriter for DieselRepository {
    fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project> {
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let db_new_project: DbNewProject = new_project.into();

        let db_project = diesel::insert_into(projects::table)
            .values(&db_new_project)
            .get_result::<DbProject>(&mut conn)?;

        Ok(Project::try_from(db_project)?)
    }

    fn update_project(
        &self,
        id: ProjectId,
        profile_id: ProfileId,
        updates: &UpdateProject,
    ) -> RepositoryResult<Project> {
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let changes = DbUpdateProject::new(updates, Utc::now().naive_utc());

        let db_project = diesel::update(
            projects::table
                .filter(projects::id.eq(id.get()))
                .filter(projects::profile_id.eq(profile_id.get())),
        )
        .set(&changes)
        .get_result::<DbProject>(&mut conn)?;

        Ok(Project::try_from(db_project)?)
    }

    fn delete_project(&self, id: ProjectId, profile_id: ProfileId) -> RepositoryResult<()> {
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            projects::table
                .filter(projects::id.eq(id.get()))
                .filter(projects::profile_id.eq(profile_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
