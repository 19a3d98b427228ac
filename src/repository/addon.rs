use diesel::prelude::*;

use crate::domain::addon::{Addon, NewAddon, UpdateAddon};
use crate::domain::types::{AddonId, ProfileId};
use crate::models::addon::{
    Addon as DbAddon, NewAddon as DbNewAddon, UpdateAddon as DbUpdateAddon,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AddonReader, AddonWriter, DieselRepository};

impl AddonReader for DieselRepository {
    fn get_addon_by_id(
        &self,
        id: AddonId,
        profile_id: ProfileId,
    ) -> RepositoryResult<Option<Addon>> {
        use crate::schema::addons;

        let mut conn = self.conn()?;
        let db_addon = addons::table
            .filter(addons::id.eq(id.get()))
            .filter(addons::profile_id.eq(profile_id.get()))
            .first::<DbAddon>(&mut conn)
            .optional()?;

        Ok(db_addon.map(Addon::try_from).transpose()?)
    }

    fn list_addons(&self, profile_id: ProfileId) -> RepositoryResult<Vec<Addon>> {
        use crate::schema::addons;

        let mut conn = self.conn()?;
        let addons = addons::table
            .filter(addons::profile_id.eq(profile_id.get()))
            .order(addons::name.asc())
            .load::<DbAddon>(&mut conn)?
            .into_iter()
            .map(Addon::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(addons)
    }
}

impl AddonWriter for DieselRepository {
    fn create_addon(&self, new_addon: &NewAddon) -> RepositoryResult<Addon> {
        use crate::schema::addons;

        let mut conn = self.conn()?;
        let db_new_addon: DbNewAddon = new_addon.into();

        let db_addon = diesel::insert_into(addons::table)
            .values(&db_new_addon)
            .get_result::<DbAddon>(&mut conn)?;

        Ok(Addon::try_from(db_addon)?)
    }

    fn update_addon(
        &self,
        id: AddonId,
        profile_id: ProfileId,
        updates: &UpdateAddon,
    ) -> RepositoryResult<Addon> {
        use crate::schema::addons;

        let mut conn = self.conn()?;
        let changes: DbUpdateAddon = updates.into();

        let db_addon = diesel::update(
            addons::table
                .filter(addons::id.eq(id.get()))
                .filter(addons::profile_id.eq(profile_id.get())),
        )
        .set(&changes)
        .get_result::<DbAddon>(&mut conn)?;

        Ok(Addon::try_from(db_addon)?)
    }

    fn delete_addon(&self, id: AddonId, profile_id: ProfileId) -> RepositoryResult<()> {
        use crate::schema::addons;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            addons::table
                .filter(addons::id.eq(id.get()))
                .filter(addons::profile_id.eq(profile_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
