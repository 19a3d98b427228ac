use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::estimate::{Estimate, EstimateStatus, NewEstimate};
use crate::domain::types::{EstimateId, ProfileId};
use crate::models::estimate::{
    Estimate as DbEstimate, NewEstimate as DbNewEstimate, UpdateEstimateStatus,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, EstimateListQuery, EstimateReader, EstimateWriter};

impl EstimateReader for DieselRepository {
    fn get_estimate_by_id(
        &self,
        id: EstimateId,
        profile_id: ProfileId,
    ) -> RepositoryResult<Option<Estimate>> {
        use crate::schema::estimates;

        let mut conn = self.conn()?;
        let db_estimate = estimates::table
            .filter(estimates::id.eq(id.get()))
            .filter(estimates::profile_id.eq(profile_id.get()))
            .first::<DbEstimate>(&mut conn)
            .optional()?;

        Ok(db_estimate.map(Estimate::try_from).transpose()?)
    }

    fn list_estimates(
        &self,
        query: EstimateListQuery,
    ) -> RepositoryResult<(usize, Vec<Estimate>)> {
        use crate::schema::estimates;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = estimates::table
                .filter(estimates::profile_id.eq(query.profile_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(client_id) = query.client_id {
                items = items.filter(estimates::client_id.eq(client_id.get()));
            }
            if let Some(status) = query.status {
                items = items.filter(estimates::status.eq(status.as_str()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items =
            query_builder().order((estimates::created_at.desc(), estimates::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let estimates = items
            .load::<DbEstimate>(&mut conn)?
            .into_iter()
            .map(Estimate::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, estimates))
    }
}

impl EstimateWriter for DieselRepository {
    fn create_estimate(&self, new_estimate: &NewEstimate) -> RepositoryResult<Estimate> {
        use crate::schema::estimates;

        let mut conn = self.conn()?;
        let db_new_estimate: DbNewEstimate = new_estimate.into();

        let db_estimate = diesel::insert_into(estimates::table)
            .values(&db_new_estimate)
            .get_result::<DbEstimate>(&mut conn)?;

        Ok(Estimate::try_from(db_estimate)?)
    }

    fn update_estimate_status(
        &self,
        id: EstimateId,
        profile_id: ProfileId,
        status: EstimateStatus,
        sent_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<Estimate> {
        use crate::schema::estimates;

        let mut conn = self.conn()?;
        let changes = UpdateEstimateStatus {
            status: status.as_str(),
            sent_at,
            updated_at: Utc::now().naive_utc(),
        };

        let db_estimate = diesel::update(
            estimates::table
                .filter(estimates::id.eq(id.get()))
                .filter(estimates::profile_id.eq(profile_id.get())),
        )
        .set(&changes)
        .get_result::<DbEstimate>(&mut conn)?;

        Ok(Estimate::try_from(db_estimate)?)
    }

    fn delete_estimate(&self, id: EstimateId, profile_id: ProfileId) -> RepositoryResult<()> {
        use crate::schema::estimates;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            estimates::table
                .filter(estimates::id.eq(id.get()))
                .filter(estimates::profile_id.eq(profile_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
