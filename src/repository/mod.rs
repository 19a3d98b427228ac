//! Persistence traits and their Diesel implementation.
//!
//! Every read and write is scoped to the owning contractor profile; a record
//! belonging to another profile is reported exactly like a missing one.

use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::addon::{Addon, NewAddon, UpdateAddon};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::estimate::{Estimate, EstimateStatus, NewEstimate};
use crate::domain::pricing_settings::{NewTradePricingSettings, TradePricingSettings};
use crate::domain::profile::{NewProfile, Profile, UpdateProfile};
use crate::domain::project::{NewProject, Project, UpdateProject};
use crate::domain::template::{NewTemplate, Template};
use crate::domain::types::{
    AddonId, ClientId, EstimateId, ProfileId, ProjectId, TemplateId, UserId,
};
use crate::pricing::Trade;
use crate::repository::errors::RepositoryResult;

pub mod addon;
pub mod client;
pub mod errors;
pub mod estimate;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod pricing_settings;
pub mod profile;
pub mod project;
pub mod template;

/// Diesel backed repository shared by every handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    fn offset(&self) -> i64 {
        i64::try_from(self.page.max(1) - 1)
            .unwrap_or(i64::MAX)
            .saturating_mul(self.limit())
    }

    fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientListQuery {
    pub profile_id: ProfileId,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    pub fn new(profile_id: ProfileId) -> Self {
        Self {
            profile_id,
            search: None,
            pagination: None,
        }
    }

    /// Filters on name, email, phone and address.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimateListQuery {
    pub profile_id: ProfileId,
    pub client_id: Option<ClientId>,
    pub status: Option<EstimateStatus>,
    pub pagination: Option<Pagination>,
}

impl EstimateListQuery {
    pub fn new(profile_id: ProfileId) -> Self {
        Self {
            profile_id,
            client_id: None,
            status: None,
            pagination: None,
        }
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn status(mut self, status: EstimateStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait ProfileReader {
    fn get_profile_by_user_id(&self, user_id: &UserId) -> RepositoryResult<Option<Profile>>;
    fn get_profile_by_id(&self, id: ProfileId) -> RepositoryResult<Option<Profile>>;
}

pub trait ProfileWriter {
    /// Inserts the profile or refreshes the email of an existing one.
    fn create_or_update_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile>;
    fn update_profile(&self, id: ProfileId, updates: &UpdateProfile)
    -> RepositoryResult<Profile>;
}

pub trait ClientReader {
    fn get_client_by_id(
        &self,
        id: ClientId,
        profile_id: ProfileId,
    ) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
    fn update_client(
        &self,
        id: ClientId,
        profile_id: ProfileId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client>;
    fn delete_client(&self, id: ClientId, profile_id: ProfileId) -> RepositoryResult<()>;
}

pub trait ProjectReader {
    fn get_project_by_id(
        &self,
        id: ProjectId,
        profile_id: ProfileId,
    ) -> RepositoryResult<Option<Project>>;
    fn list_projects(
        &self,
        client_id: ClientId,
        profile_id: ProfileId,
    ) -> RepositoryResult<Vec<Project>>;
}

pub trait ProjectWriter {
    fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project>;
    fn update_project(
        &self,
        id: ProjectId,
        profile_id: ProfileId,
        updates: &UpdateProject,
    ) -> RepositoryResult<Project>;
    fn delete_project(&self, id: ProjectId, profile_id: ProfileId) -> RepositoryResult<()>;
}

pub trait PricingSettingsReader {
    fn get_pricing_settings(
        &self,
        profile_id: ProfileId,
        trade: Trade,
    ) -> RepositoryResult<Option<TradePricingSettings>>;
}

pub trait PricingSettingsWriter {
    fn save_pricing_settings(
        &self,
        settings: &NewTradePricingSettings,
    ) -> RepositoryResult<TradePricingSettings>;
}

pub trait AddonReader {
    fn get_addon_by_id(&self, id: AddonId, profile_id: ProfileId)
    -> RepositoryResult<Option<Addon>>;
    fn list_addons(&self, profile_id: ProfileId) -> RepositoryResult<Vec<Addon>>;
}

pub trait AddonWriter {
    fn create_addon(&self, new_addon: &NewAddon) -> RepositoryResult<Addon>;
    fn update_addon(
        &self,
        id: AddonId,
        profile_id: ProfileId,
        updates: &UpdateAddon,
    ) -> RepositoryResult<Addon>;
    fn delete_addon(&self, id: AddonId, profile_id: ProfileId) -> RepositoryResult<()>;
}

pub trait TemplateReader {
    fn get_template_by_id(
        &self,
        id: TemplateId,
        profile_id: ProfileId,
    ) -> RepositoryResult<Option<Template>>;
    fn list_templates(&self, profile_id: ProfileId) -> RepositoryResult<Vec<Template>>;
}

pub trait TemplateWriter {
    fn create_template(&self, new_template: &NewTemplate) -> RepositoryResult<Template>;
    fn delete_template(&self, id: TemplateId, profile_id: ProfileId) -> RepositoryResult<()>;
}

pub trait EstimateReader {
    fn get_estimate_by_id(
        &self,
        id: EstimateId,
        profile_id: ProfileId,
    ) -> RepositoryResult<Option<Estimate>>;
    fn list_estimates(&self, query: EstimateListQuery)
    -> RepositoryResult<(usize, Vec<Estimate>)>;
}

pub trait EstimateWriter {
    fn create_estimate(&self, new_estimate: &NewEstimate) -> RepositoryResult<Estimate>;
    /// Sets the status; `sent_at` is only written when provided.
    fn update_estimate_status(
        &self,
        id: EstimateId,
        profile_id: ProfileId,
        status: EstimateStatus,
        sent_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<Estimate>;
    fn delete_estimate(&self, id: EstimateId, profile_id: ProfileId) -> RepositoryResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_offsets() {
        let second = Pagination {
            page: 2,
            per_page: 20,
        };
        assert_eq!((second.offset(), second.limit()), (20, 20));

        let first = Pagination {
            page: 0,
            per_page: 20,
        };
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn huge_pages_saturate() {
        let huge = Pagination {
            page: usize::MAX,
            per_page: 20,
        };
        assert_eq!(huge.offset(), i64::MAX);

        let huge_page_size = Pagination {
            page: 1,
            per_page: usize::MAX,
        };
        assert_eq!(huge_page_size.limit(), i64::MAX);
    }
}
