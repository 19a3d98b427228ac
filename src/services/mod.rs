//! Application services invoked by the HTTP routes.
//!
//! Services are plain functions generic over the repository traits they
//! need, so they can be exercised against [`crate::repository::mock`].

pub mod addons;
pub mod clients;
pub mod estimates;
pub mod profile;
pub mod projects;
pub mod send_estimate;
pub mod settings;
pub mod templates;

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::{FieldErrors, FormError, field_errors};
use crate::pricing::PricingError;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    /// Per-field messages for the submitted payload.
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    TypeConstraint(String),

    #[error("{0}")]
    Pricing(#[from] PricingError),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    #[error("Mailer error: {0}")]
    Mailer(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Validation(errors) => ServiceError::Validation(field_errors(&errors)),
            FormError::TypeConstraint(err) => err.into(),
            FormError::Pricing(err) => err.into(),
            other => ServiceError::Form(other.to_string()),
        }
    }
}

/// Parses an identifier taken from the request path. Identifiers that can
/// never exist are reported as missing.
pub(crate) fn path_id<T>(raw: i32) -> ServiceResult<T>
where
    T: TryFrom<i32, Error = TypeConstraintError>,
{
    T::try_from(raw).map_err(|_| ServiceError::NotFound)
}
