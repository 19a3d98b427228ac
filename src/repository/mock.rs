//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

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
use crate::repository::{
    AddonReader, AddonWriter, ClientListQuery, ClientReader, ClientWriter, EstimateListQuery,
    EstimateReader, EstimateWriter, PricingSettingsReader, PricingSettingsWriter, ProfileReader,
    ProfileWriter, ProjectReader, ProjectWriter, TemplateReader, TemplateWriter,
};

mock! {
    pub Repository {}

    impl ProfileReader for Repository {
        fn get_profile_by_user_id(&self, user_id: &UserId) -> RepositoryResult<Option<Profile>>;
        fn get_profile_by_id(&self, id: ProfileId) -> RepositoryResult<Option<Profile>>;
    }

    impl ProfileWriter for Repository {
        fn create_or_update_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile>;
        fn update_profile(
            &self,
            id: ProfileId,
            updates: &UpdateProfile,
        ) -> RepositoryResult<Profile>;
    }

    impl ClientReader for Repository {
        fn get_client_by_id(
            &self,
            id: ClientId,
            profile_id: ProfileId,
        ) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    }

    impl ClientWriter for Repository {
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

    impl ProjectReader for Repository {
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

    impl ProjectWriter for Repository {
        fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project>;
        fn update_project(
            &self,
            id: ProjectId,
            profile_id: ProfileId,
            updates: &UpdateProject,
        ) -> RepositoryResult<Project>;
        fn delete_project(&self, id: ProjectId, profile_id: ProfileId) -> RepositoryResult<()>;
    }

    impl PricingSettingsReader for Repository {
        fn get_pricing_settings(
            &self,
            profile_id: ProfileId,
            trade: Trade,
        ) -> RepositoryResult<Option<TradePricingSettings>>;
    }

    impl PricingSettingsWriter for Repository {
        fn save_pricing_settings(
            &self,
            settings: &NewTradePricingSettings,
        ) -> RepositoryResult<TradePricingSettings>;
    }

    impl AddonReader for Repository {
        fn get_addon_by_id(
            &self,
            id: AddonId,
            profile_id: ProfileId,
        ) -> RepositoryResult<Option<Addon>>;
        fn list_addons(&self, profile_id: ProfileId) -> RepositoryResult<Vec<Addon>>;
    }

    impl AddonWriter for Repository {
        fn create_addon(&self, new_addon: &NewAddon) -> RepositoryResult<Addon>;
        fn update_addon(
            &self,
            id: AddonId,
            profile_id: ProfileId,
            updates: &UpdateAddon,
        ) -> RepositoryResult<Addon>;
        fn delete_addon(&self, id: AddonId, profile_id: ProfileId) -> RepositoryResult<()>;
    }

    impl TemplateReader for Repository {
        fn get_template_by_id(
            &self,
            id: TemplateId,
            profile_id: ProfileId,
        ) -> RepositoryResult<Option<Template>>;
        fn list_templates(&self, profile_id: ProfileId) -> RepositoryResult<Vec<Template>>;
    }

    impl TemplateWriter for Repository {
        fn create_template(&self, new_template: &NewTemplate) -> RepositoryResult<Template>;
        fn delete_template(&self, id: TemplateId, profile_id: ProfileId) -> RepositoryResult<()>;
    }

    impl EstimateReader for Repository {
        fn get_estimate_by_id(
            &self,
            id: EstimateId,
            profile_id: ProfileId,
        ) -> RepositoryResult<Option<Estimate>>;
        fn list_estimates(
            &self,
            query: EstimateListQuery,
        ) -> RepositoryResult<(usize, Vec<Estimate>)>;
    }

    impl EstimateWriter for Repository {
        fn create_estimate(&self, new_estimate: &NewEstimate) -> RepositoryResult<Estimate>;
        fn update_estimate_status(
            &self,
            id: EstimateId,
            profile_id: ProfileId,
            status: EstimateStatus,
            sent_at: Option<NaiveDateTime>,
        ) -> RepositoryResult<Estimate>;
        fn delete_estimate(&self, id: EstimateId, profile_id: ProfileId) -> RepositoryResult<()>;
    }
}
