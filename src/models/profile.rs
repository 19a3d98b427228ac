//! Diesel models for contractor profiles.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::profile::{
    NewProfile as DomainNewProfile, Profile as DomainProfile, UpdateProfile as DomainUpdateProfile,
};
use crate::domain::types::{
    BusinessName, EmailAddress, PhoneNumber, ProfileId, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::profiles)]
/// Diesel model for [`crate::domain::profile::Profile`].
pub struct Profile {
    pub id: i32,
    pub user_id: String,
    pub email: String,
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::profiles)]
/// Insertable form of [`Profile`].
pub struct NewProfile<'a> {
    pub user_id: &'a str,
    pub email: &'a str,
    pub business_name: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Profile`] record.
pub struct UpdateProfile<'a> {
    pub business_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Profile> for DomainProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: Profile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProfileId::try_from(profile.id)?,
            user_id: UserId::new(profile.user_id)?,
            email: EmailAddress::new(profile.email)?,
            business_name: profile.business_name.map(BusinessName::new).transpose()?,
            phone: profile.phone.map(PhoneNumber::new).transpose()?,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProfile> for NewProfile<'a> {
    fn from(profile: &'a DomainNewProfile) -> Self {
        Self {
            user_id: profile.user_id.as_str(),
            email: profile.email.as_str(),
            business_name: profile.business_name.as_ref().map(|n| n.as_str()),
        }
    }
}

impl<'a> UpdateProfile<'a> {
    pub fn new(profile: &'a DomainUpdateProfile, updated_at: NaiveDateTime) -> Self {
        Self {
            business_name: profile.business_name.as_ref().map(|n| n.as_str()),
            phone: profile.phone.as_ref().map(|p| p.as_str()),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn profile_into_domain() {
        let now = Utc::now().naive_utc();
        let db = Profile {
            id: 3,
            user_id: "auth0|abc".into(),
            email: "Owner@Example.com".into(),
            business_name: Some("Smooth Walls LLC".into()),
            phone: None,
            created_at: now,
            updated_at: now,
        };

        let domain = DomainProfile::try_from(db).expect("valid profile");
        assert_eq!(domain.id.get(), 3);
        assert_eq!(domain.email.as_str(), "owner@example.com");
        assert_eq!(domain.display_name(), "Smooth Walls LLC");
    }

    #[test]
    fn invalid_stored_email_is_reported() {
        let now = Utc::now().naive_utc();
        let db = Profile {
            id: 3,
            user_id: "u".into(),
            email: "broken".into(),
            business_name: None,
            phone: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            DomainProfile::try_from(db),
            Err(TypeConstraintError::InvalidEmail)
        );
    }
}
