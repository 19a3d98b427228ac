use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::addon::{
    Addon as DomainAddon, NewAddon as DomainNewAddon, UpdateAddon as DomainUpdateAddon,
};
use crate::domain::types::{AddonId, AddonName, Amount, Notes, ProfileId, TypeConstraintError};
use crate::pricing::AddonPricing;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::addons)]
pub struct Addon {
    pub id: i32,
    pub profile_id: i32,
    pub name: String,
    pub pricing: String,
    pub unit_price: f64,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::addons)]
pub struct NewAddon<'a> {
    pub profile_id: i32,
    pub name: &'a str,
    pub pricing: &'static str,
    pub unit_price: f64,
    pub description: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::addons)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateAddon<'a> {
    pub name: &'a str,
    pub pricing: &'static str,
    pub unit_price: f64,
    pub description: Option<&'a str>,
}

impl TryFrom<Addon> for DomainAddon {
    type Error = TypeConstraintError;

    fn try_from(addon: Addon) -> Result<Self, Self::Error> {
        let pricing = addon
            .pricing
            .parse::<AddonPricing>()
            .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))?;

        Ok(Self {
            id: AddonId::try_from(addon.id)?,
            profile_id: ProfileId::try_from(addon.profile_id)?,
            name: AddonName::new(addon.name)?,
            pricing,
            unit_price: Amount::new(addon.unit_price)?,
            description: addon.description.map(Notes::new).transpose()?,
            created_at: addon.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewAddon> for NewAddon<'a> {
    fn from(addon: &'a DomainNewAddon) -> Self {
        Self {
            profile_id: addon.profile_id.get(),
            name: addon.name.as_str(),
            pricing: addon.pricing.as_str(),
            unit_price: addon.unit_price.get(),
            description: addon.description.as_ref().map(|d| d.as_str()),
        }
    }
}

impl<'a> From<&'a DomainUpdateAddon> for UpdateAddon<'a> {
    fn from(addon: &'a DomainUpdateAddon) -> Self {
        Self {
            name: addon.name.as_str(),
            pricing: addon.pricing.as_str(),
            unit_price: addon.unit_price.get(),
            description: addon.description.as_ref().map(|d| d.as_str()),
        }
    }
}
