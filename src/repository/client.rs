use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientId, ProfileId};
use crate::models::client::{
    Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter, DieselRepository};

impl ClientReader for DieselRepository {
    fn get_client_by_id(
        &self,
        id: ClientId,
        profile_id: ProfileId,
    ) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_client = clients::table
            .filter(clients::id.eq(id.get()))
            .filter(clients::profile_id.eq(profile_id.get()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(db_client.map(Client::try_from).transpose()?)
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let pattern = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| format!("%{term}%"));

        let query_builder = || {
            let mut items = clients::table
                .filter(clients::profile_id.eq(query.profile_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(pattern) = &pattern {
                items = items.filter(
                    clients::name
                        .like(pattern)
                        .or(clients::email.like(pattern))
                        .or(clients::phone.like(pattern))
                        .or(clients::address.like(pattern)),
                );
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((clients::name.asc(), clients::id.asc()));
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let clients = items
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(Client::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, clients))
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_new_client: DbNewClient = new_client.into();

        let db_client = diesel::insert_into(clients::table)
            .values(&db_new_client)
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(db_client)?)
    }

    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let insertables = new_clients.iter().map(DbNewClient::from).collect::<Vec<_>>();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut inserted = 0;
            for client in &insertables {
                inserted += diesel::insert_into(clients::table)
                    .values(client)
                    .execute(conn)?;
            }
            Ok(inserted)
        })
        .map_err(RepositoryError::from)
    }

    fn update_client(
        &self,
        id: ClientId,
        profile_id: ProfileId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let changes = DbUpdateClient::new(updates, Utc::now().naive_utc());

        let db_client = diesel::update(
            clients::table
                .filter(clients::id.eq(id.get()))
                .filter(clients::profile_id.eq(profile_id.get())),
        )
        .set(&changes)
        .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(db_client)?)
    }

    fn delete_client(&self, id: ClientId, profile_id: ProfileId) -> RepositoryResult<()> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            clients::table
                .filter(clients::id.eq(id.get()))
                .filter(clients::profile_id.eq(profile_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
