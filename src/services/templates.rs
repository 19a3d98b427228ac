use crate::domain::template::Template;
use crate::domain::types::{ProfileId, TemplateId};
use crate::forms::template::TemplateForm;
use crate::repository::{TemplateReader, TemplateWriter};
use crate::services::{ServiceError, ServiceResult, path_id};

pub fn list_templates<R>(repo: &R, profile_id: ProfileId) -> ServiceResult<Vec<Template>>
where
    R: TemplateReader + ?Sized,
{
    repo.list_templates(profile_id).map_err(ServiceError::from)
}

pub fn get_template<R>(repo: &R, profile_id: ProfileId, template_id: i32) -> ServiceResult<Template>
where
    R: TemplateReader + ?Sized,
{
    let template_id: TemplateId = path_id(template_id)?;
    repo.get_template_by_id(template_id, profile_id)?
        .ok_or(ServiceError::NotFound)
}

/// Saves the current wizard choices as a reusable preset.
pub fn create_template<R>(
    repo: &R,
    profile_id: ProfileId,
    form: TemplateForm,
) -> ServiceResult<Template>
where
    R: TemplateWriter + ?Sized,
{
    let new_template = form.into_new_template(profile_id)?;

    repo.create_template(&new_template).map_err(|err| {
        log::error!("Failed to save template: {err}");
        ServiceError::from(err)
    })
}

pub fn delete_template<R>(repo: &R, profile_id: ProfileId, template_id: i32) -> ServiceResult<()>
where
    R: TemplateWriter + ?Sized,
{
    repo.delete_template(path_id(template_id)?, profile_id)
        .map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    #[test]
    fn template_measurements_are_checked_against_trade() {
        let mut repo = MockRepository::new();
        repo.expect_create_template().times(0);

        let form = TemplateForm {
            name: "Garage".into(),
            trade: "framing".into(),
            complexity: Some("simple".into()),
            measurements: [("wall_sqft".to_string(), 100.0)].into_iter().collect(),
            addons: Vec::new(),
        };
        assert!(matches!(
            create_template(&repo, ProfileId::new(1).unwrap(), form),
            Err(ServiceError::Pricing(_))
        ));
    }

    #[test]
    fn missing_template_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_template_by_id().returning(|_, _| Ok(None));

        assert!(matches!(
            get_template(&repo, ProfileId::new(1).unwrap(), 12),
            Err(ServiceError::NotFound)
        ));
    }
}
