//! Errors raised by the service layer.

use crate::db::repository::RepositoryError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level failure.
///
/// A store-level `NotFound` always surfaces as [`ServiceError::NotFound`]; the
/// HTTP boundary maps it to a client error.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The targeted post does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Any other store failure.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        if err.is_not_found() {
            ServiceError::NotFound(err.message().to_string())
        } else {
            ServiceError::Repository(err)
        }
    }
}
