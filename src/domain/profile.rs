use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BusinessName, EmailAddress, PhoneNumber, ProfileId, TypeConstraintError, UserId,
};

/// Contractor account owning every other record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub email: EmailAddress,
    pub business_name: Option<BusinessName>,
    pub phone: Option<PhoneNumber>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Profile {
    /// Name used as the sender of outgoing estimates.
    pub fn display_name(&self) -> &str {
        self.business_name
            .as_ref()
            .map(BusinessName::as_str)
            .unwrap_or_else(|| self.email.as_str())
    }
}

/// Profile data taken from the auth provider's token on first use.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProfile {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub business_name: Option<BusinessName>,
}

impl NewProfile {
    #[must_use]
    pub fn new(user_id: UserId, email: EmailAddress, business_name: Option<BusinessName>) -> Self {
        Self {
            user_id,
            email,
            business_name,
        }
    }

    pub fn try_new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        business_name: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self::new(
            UserId::new(user_id)?,
            EmailAddress::new(email)?,
            business_name.and_then(|name| BusinessName::new(name).ok()),
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateProfile {
    pub business_name: Option<BusinessName>,
    pub phone: Option<PhoneNumber>,
}
