use crate::auth::AuthenticatedUser;
use crate::domain::profile::{NewProfile, Profile, UpdateProfile};
use crate::domain::types::{BusinessName, EmailAddress, ProfileId, UserId};
use crate::forms::profile::ProfileForm;
use crate::repository::{ProfileReader, ProfileWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns the caller's profile, creating it from the token claims on first
/// use and refreshing the stored email when the claims carry a new one.
pub fn ensure_profile<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Profile>
where
    R: ProfileReader + ProfileWriter + ?Sized,
{
    let user_id = UserId::new(user.sub.clone()).map_err(|_| ServiceError::Unauthorized)?;
    let email = EmailAddress::new(user.email.clone()).map_err(|err| {
        log::error!("Token for {user_id} carries an invalid email: {err}");
        ServiceError::Unauthorized
    })?;

    match repo.get_profile_by_user_id(&user_id)? {
        Some(profile) if profile.email == email => return Ok(profile),
        _ => {}
    }

    let business_name = user
        .name
        .clone()
        .and_then(|name| BusinessName::new(name).ok());
    let new_profile = NewProfile::new(user_id, email, business_name);

    repo.create_or_update_profile(&new_profile).map_err(|err| {
        log::error!("Failed to store profile: {err}");
        ServiceError::from(err)
    })
}

/// Replaces the editable profile fields.
pub fn update_profile<R>(
    repo: &R,
    profile_id: ProfileId,
    form: ProfileForm,
) -> ServiceResult<Profile>
where
    R: ProfileWriter + ?Sized,
{
    let updates = UpdateProfile::try_from(form)?;

    repo.update_profile(profile_id, &updates).map_err(|err| {
        log::error!("Failed to update profile {profile_id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::repository::mock::MockRepository;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "auth0|42".into(),
            email: "Pro@Example.com".into(),
            name: Some("Pat's Drywall".into()),
        }
    }

    fn profile(email: &str) -> Profile {
        Profile {
            id: ProfileId::new(7).unwrap(),
            user_id: UserId::new("auth0|42").unwrap(),
            email: EmailAddress::new(email).unwrap(),
            business_name: None,
            phone: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn existing_profile_is_reused() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_user_id()
            .returning(|_| Ok(Some(profile("pro@example.com"))));
        repo.expect_create_or_update_profile().times(0);

        let result = ensure_profile(&repo, &user()).unwrap();
        assert_eq!(result.id.get(), 7);
    }

    #[test]
    fn first_request_creates_profile() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_user_id().returning(|_| Ok(None));
        repo.expect_create_or_update_profile()
            .withf(|p| {
                p.email.as_str() == "pro@example.com"
                    && p.business_name.as_ref().map(|n| n.as_str()) == Some("Pat's Drywall")
            })
            .times(1)
            .returning(|_| Ok(profile("pro@example.com")));

        assert!(ensure_profile(&repo, &user()).is_ok());
    }

    #[test]
    fn changed_email_is_refreshed() {
        let mut repo = MockRepository::new();
        repo.expect_get_profile_by_user_id()
            .returning(|_| Ok(Some(profile("old@example.com"))));
        repo.expect_create_or_update_profile()
            .times(1)
            .returning(|_| Ok(profile("pro@example.com")));

        let result = ensure_profile(&repo, &user()).unwrap();
        assert_eq!(result.email.as_str(), "pro@example.com");
    }

    #[test]
    fn invalid_claims_are_unauthorized() {
        let repo = MockRepository::new();
        let mut claims = user();
        claims.email = "not-an-email".into();

        assert!(matches!(
            ensure_profile(&repo, &claims),
            Err(ServiceError::Unauthorized)
        ));
    }
}
