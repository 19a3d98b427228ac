use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};
use crate::domain::types::{
    ClientId, ClientName, EmailAddress, Notes, PhoneNumber, ProfileId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub profile_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub profile_id: i32,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::try_from(client.id)?,
            profile_id: ProfileId::try_from(client.profile_id)?,
            name: ClientName::new(client.name)?,
            email: client.email.map(EmailAddress::new).transpose()?,
            phone: client.phone.map(PhoneNumber::new).transpose()?,
            address: client.address,
            notes: client.notes.map(Notes::new).transpose()?,
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            profile_id: client.profile_id.get(),
            name: client.name.as_str(),
            email: client.email.as_ref().map(|e| e.as_str()),
            phone: client.phone.as_ref().map(|p| p.as_str()),
            address: client.address.as_deref(),
            notes: client.notes.as_ref().map(|n| n.as_str()),
        }
    }
}

impl<'a> UpdateClient<'a> {
    pub fn new(client: &'a DomainUpdateClient, updated_at: NaiveDateTime) -> Self {
        Self {
            name: client.name.as_str(),
            email: client.email.as_ref().map(|e| e.as_str()),
            phone: client.phone.as_ref().map(|p| p.as_str()),
            address: client.address.as_deref(),
            notes: client.notes.as_ref().map(|n| n.as_str()),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn sample_domain_new() -> DomainNewClient {
        DomainNewClient::try_new(
            ProfileId::new(1).unwrap(),
            "John",
            Some("john@example.com".to_string()),
            Some("+14155550100".to_string()),
            Some("addr".to_string()),
            None,
        )
        .expect("valid client")
    }

    #[test]
    fn from_domain_new_creates_newclient() {
        let domain = sample_domain_new();
        let new: NewClient = (&domain).into();
        assert_eq!(new.profile_id, 1);
        assert_eq!(new.name, "John");
        assert_eq!(new.email, Some("john@example.com"));
        assert_eq!(new.phone, Some("+14155550100"));
        assert_eq!(new.address, Some("addr"));
        assert_eq!(new.notes, None);
    }

    #[test]
    fn client_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_client = Client {
            id: 1,
            profile_id: 2,
            name: "n".to_string(),
            email: Some("e@example.com".to_string()),
            phone: None,
            address: Some("a".to_string()),
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainClient::try_from(db_client).expect("valid client");
        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.profile_id.get(), 2);
        assert_eq!(domain.name.as_str(), "n");
        assert_eq!(domain.email.map(String::from), Some("e@example.com".into()));
        assert_eq!(domain.address, Some("a".to_string()));
        assert_eq!(domain.created_at, now);
    }
}
