use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::domain::profile::{NewProfile, Profile, UpdateProfile};
use crate::domain::types::{ProfileId, UserId};
use crate::models::profile::{
    NewProfile as DbNewProfile, Profile as DbProfile, UpdateProfile as DbUpdateProfile,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProfileReader, ProfileWriter};

impl ProfileReader for DieselRepository {
    fn get_profile_by_user_id(&self, user_id: &UserId) -> RepositoryResult<Option<Profile>> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let db_profile = profiles::table
            .filter(profiles::user_id.eq(user_id.as_str()))
            .first::<DbProfile>(&mut conn)
            .optional()?;

        Ok(db_profile.map(Profile::try_from).transpose()?)
    }

    fn get_profile_by_id(&self, id: ProfileId) -> RepositoryResult<Option<Profile>> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let db_profile = profiles::table
            .find(id.get())
            .first::<DbProfile>(&mut conn)
            .optional()?;

        Ok(db_profile.map(Profile::try_from).transpose()?)
    }
}

impl ProfileWriter for DieselRepository {
    fn create_or_update_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let db_new_profile: DbNewProfile = new_profile.into();

        let db_profile = diesel::insert_into(profiles::table)
            .values(&db_new_profile)
            .on_conflict(profiles::user_id)
            .do_update()
            .set((
                profiles::email.eq(excluded(profiles::email)),
                profiles::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbProfile>(&mut conn)?;

        Ok(Profile::try_from(db_profile)?)
    }

    fn update_profile(
        &self,
        id: ProfileId,
        updates: &UpdateProfile,
    ) -> RepositoryResult<Profile> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let changes = DbUpdateProfile::new(updates, Utc::now().naive_utc());

        let db_profile = diesel::update(profiles::table.find(id.get()))
            .set(&changes)
            .get_result::<DbProfile>(&mut conn)?;

        Ok(Profile::try_from(db_profile)?)
    }
}
