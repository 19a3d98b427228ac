use serde::Deserialize;
use validator::Validate;

use crate::domain::normalize_optional;
use crate::domain::profile::UpdateProfile;
use crate::domain::types::{BusinessName, PhoneNumber};
use crate::forms::FormError;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileForm {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub business_name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 40))]
    pub phone: Option<String>,
}

impl TryFrom<ProfileForm> for UpdateProfile {
    type Error = FormError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(UpdateProfile {
            business_name: normalize_optional(form.business_name)
                .map(BusinessName::new)
                .transpose()?,
            phone: normalize_optional(form.phone)
                .map(PhoneNumber::new)
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TypeConstraintError;

    #[test]
    fn blank_fields_clear_values() {
        let update = UpdateProfile::try_from(ProfileForm {
            business_name: Some("  ".into()),
            phone: None,
        })
        .unwrap();
        assert!(update.business_name.is_none());
        assert!(update.phone.is_none());
    }

    #[test]
    fn invalid_phone_is_rejected() {
        let result = UpdateProfile::try_from(ProfileForm {
            business_name: None,
            phone: Some("12".into()),
        });
        assert!(matches!(
            result,
            Err(FormError::TypeConstraint(TypeConstraintError::InvalidPhone))
        ));
    }
}
