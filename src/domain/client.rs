use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::normalize_optional;
use crate::domain::types::{
    ClientId, ClientName, EmailAddress, Notes, PhoneNumber, ProfileId, TypeConstraintError,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub profile_id: ProfileId,
    pub name: ClientName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub notes: Option<Notes>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub profile_id: ProfileId,
    pub name: ClientName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub notes: Option<Notes>,
}

impl NewClient {
    /// Validates raw input. Blank optional values are treated as absent.
    pub fn try_new(
        profile_id: ProfileId,
        name: impl Into<String>,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        notes: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            profile_id,
            name: ClientName::new(name)?,
            email: normalize_optional(email).map(EmailAddress::new).transpose()?,
            phone: normalize_optional(phone).map(PhoneNumber::new).transpose()?,
            address: normalize_optional(address),
            notes: Notes::from_optional(notes),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateClient {
    pub name: ClientName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub notes: Option<Notes>,
}

impl UpdateClient {
    pub fn try_new(
        name: impl Into<String>,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        notes: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: ClientName::new(name)?,
            email: normalize_optional(email).map(EmailAddress::new).transpose()?,
            phone: normalize_optional(phone).map(PhoneNumber::new).transpose()?,
            address: normalize_optional(address),
            notes: Notes::from_optional(notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optionals_become_none() {
        let profile_id = ProfileId::new(1).unwrap();
        let client = NewClient::try_new(
            profile_id,
            " Jane Smith ",
            Some("  ".into()),
            Some(String::new()),
            Some(" 12 Oak St ".into()),
            None,
        )
        .unwrap();

        assert_eq!(client.name.as_str(), "Jane Smith");
        assert!(client.email.is_none());
        assert!(client.phone.is_none());
        assert_eq!(client.address.as_deref(), Some("12 Oak St"));
    }

    #[test]
    fn invalid_email_is_rejected() {
        let result = UpdateClient::try_new("Jane", Some("jane@".into()), None, None, None);
        assert_eq!(result, Err(TypeConstraintError::InvalidEmail));
    }
}
