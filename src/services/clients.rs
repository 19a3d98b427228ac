use crate::domain::client::Client;
use crate::domain::types::{ClientId, ProfileId};
use crate::dto::client::{ClientDetails, ClientsQuery};
use crate::forms::client::{ClientForm, ClientsCsv};
use crate::pagination::{Paginated, page_params};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter, ProjectReader};
use crate::services::{ServiceError, ServiceResult, path_id};

/// Lists the caller's clients, optionally filtered by a search term.
pub fn list_clients<R>(
    repo: &R,
    profile_id: ProfileId,
    query: ClientsQuery,
) -> ServiceResult<Paginated<Client>>
where
    R: ClientReader + ?Sized,
{
    let (page, per_page) = page_params(query.page, query.per_page);
    let mut list_query = ClientListQuery::new(profile_id).paginate(page, per_page);

    if let Some(term) = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        list_query = list_query.search(term);
    }

    let (total, clients) = repo.list_clients(list_query).map_err(|err| {
        log::error!("Failed to list clients: {err}");
        ServiceError::from(err)
    })?;

    Ok(Paginated::new(clients, total, page, per_page))
}

/// Loads a client owned by the caller.
pub(crate) fn owned_client<R>(
    repo: &R,
    profile_id: ProfileId,
    client_id: ClientId,
) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    repo.get_client_by_id(client_id, profile_id)?
        .ok_or(ServiceError::NotFound)
}

/// Returns a client with its projects.
pub fn get_client<R>(
    repo: &R,
    profile_id: ProfileId,
    client_id: i32,
) -> ServiceResult<ClientDetails>
where
    R: ClientReader + ProjectReader + ?Sized,
{
    let client = owned_client(repo, profile_id, path_id(client_id)?)?;
    let projects = repo.list_projects(client.id, profile_id)?;
    Ok(ClientDetails { client, projects })
}

pub fn create_client<R>(repo: &R, profile_id: ProfileId, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let new_client = form.into_new_client(profile_id)?;

    repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to add a client: {err}");
        ServiceError::from(err)
    })
}

pub fn update_client<R>(
    repo: &R,
    profile_id: ProfileId,
    client_id: i32,
    form: ClientForm,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let client_id: ClientId = path_id(client_id)?;
    let updates = form.into_update()?;

    repo.update_client(client_id, profile_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a client. Its projects and estimates go with it.
pub fn delete_client<R>(repo: &R, profile_id: ProfileId, client_id: i32) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    repo.delete_client(path_id(client_id)?, profile_id)
        .map_err(ServiceError::from)
}

/// Creates clients from an uploaded CSV file and returns how many were added.
pub fn import_clients<R>(repo: &R, profile_id: ProfileId, csv: &[u8]) -> ServiceResult<usize>
where
    R: ClientWriter + ?Sized,
{
    let clients = ClientsCsv::new(csv).parse(profile_id).map_err(|err| {
        log::error!("Failed to parse clients: {err}");
        ServiceError::Form(err.to_string())
    })?;

    if clients.is_empty() {
        return Ok(0);
    }

    repo.create_clients(&clients).map_err(|err| {
        log::error!("Failed to add clients: {err}");
        ServiceError::from(err)
    })
}
