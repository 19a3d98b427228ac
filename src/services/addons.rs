use crate::domain::addon::{Addon, UpdateAddon};
use crate::domain::types::{AddonId, ProfileId};
use crate::forms::addon::AddonForm;
use crate::repository::{AddonReader, AddonWriter};
use crate::services::{ServiceError, ServiceResult, path_id};

pub fn list_addons<R>(repo: &R, profile_id: ProfileId) -> ServiceResult<Vec<Addon>>
where
    R: AddonReader + ?Sized,
{
    repo.list_addons(profile_id).map_err(ServiceError::from)
}

pub fn create_addon<R>(repo: &R, profile_id: ProfileId, form: AddonForm) -> ServiceResult<Addon>
where
    R: AddonWriter + ?Sized,
{
    let new_addon = form.into_new_addon(profile_id)?;

    repo.create_addon(&new_addon).map_err(|err| {
        log::error!("Failed to add an addon: {err}");
        ServiceError::from(err)
    })
}

pub fn update_addon<R>(
    repo: &R,
    profile_id: ProfileId,
    addon_id: i32,
    form: AddonForm,
) -> ServiceResult<Addon>
where
    R: AddonWriter + ?Sized,
{
    let addon_id: AddonId = path_id(addon_id)?;
    let updates = UpdateAddon::try_from(form)?;

    repo.update_addon(addon_id, profile_id, &updates)
        .map_err(ServiceError::from)
}

pub fn delete_addon<R>(repo: &R, profile_id: ProfileId, addon_id: i32) -> ServiceResult<()>
where
    R: AddonWriter + ?Sized,
{
    repo.delete_addon(path_id(addon_id)?, profile_id)
        .map_err(ServiceError::from)
}
