use crate::domain::project::Project;
use crate::domain::types::{ClientId, ProfileId, ProjectId};
use crate::forms::project::ProjectForm;
use crate::repository::{ClientReader, ProjectReader, ProjectWriter};
use crate::services::clients::owned_client;
use crate::services::{ServiceError, ServiceResult, path_id};

/// Lists the projects of a client owned by the caller.
pub fn list_projects<R>(
    repo: &R,
    profile_id: ProfileId,
    client_id: i32,
) -> ServiceResult<Vec<Project>>
where
    R: ClientReader + ProjectReader + ?Sized,
{
    let client = owned_client(repo, profile_id, path_id(client_id)?)?;
    repo.list_projects(client.id, profile_id)
        .map_err(ServiceError::from)
}

pub fn get_project<R>(repo: &R, profile_id: ProfileId, project_id: i32) -> ServiceResult<Project>
where
    R: ProjectReader + ?Sized,
{
    let project_id: ProjectId = path_id(project_id)?;
    repo.get_project_by_id(project_id, profile_id)?
        .ok_or(ServiceError::NotFound)
}

/// Adds a project to one of the caller's clients.
pub fn create_project<R>(
    repo: &R,
    profile_id: ProfileId,
    client_id: i32,
    form: ProjectForm,
) -> ServiceResult<Project>
where
    R: ClientReader + ProjectWriter + ?Sized,
{
    let client_id: ClientId = path_id(client_id)?;
    let new_project = form.into_new_project(profile_id, client_id)?;
    owned_client(repo, profile_id, client_id)?;

    repo.create_project(&new_project).map_err(|err| {
        log::error!("Failed to add a project: {err}");
        ServiceError::from(err)
    })
}

pub fn update_project<R>(
    repo: &R,
    profile_id: ProfileId,
    project_id: i32,
    form: ProjectForm,
) -> ServiceResult<Project>
where
    R: ProjectWriter + ?Sized,
{
    let project_id: ProjectId = path_id(project_id)?;
    let updates = form.into_update()?;

    repo.update_project(project_id, profile_id, &updates)
        .map_err(ServiceError::from)
}

pub fn delete_project<R>(repo: &R, profile_id: ProfileId, project_id: i32) -> ServiceResult<()>
where
    R: ProjectWriter + ?Sized,
{
    repo.delete_project(path_id(project_id)?, profile_id)
        .map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn form() -> ProjectForm {
        ProjectForm {
            name: "Basement finish".into(),
            ..ProjectForm::default()
        }
    }

    #[test]
    fn project_requires_owned_client() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_, _| Ok(None));
        repo.expect_create_project().times(0);

        let result = create_project(&repo, ProfileId::new(1).unwrap(), 5, form());
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn listing_projects_of_foreign_client_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().returning(|_, _| Ok(None));
        repo.expect_list_projects().times(0);

        assert!(matches!(
            list_projects(&repo, ProfileId::new(1).unwrap(), 5),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn invalid_path_id_is_not_found() {
        let repo = MockRepository::new();
        assert!(matches!(
            update_project(&repo, ProfileId::new(1).unwrap(), -1, form()),
            Err(ServiceError::NotFound)
        ));
    }
}
