//! Service-layer error types

use thiserror::Error;

use crate::models::TimeOffStatus;
use crate::pin::PinHashError;
use crate::repositories::StoreError;

/// Broad classification used by callers to pick a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was rejected before reaching the store
    Validation,
    /// The referenced record does not exist
    NotFound,
    /// A uniqueness or state constraint rejected the operation
    Conflict,
    /// The store could not be reached; the caller may try again
    Transient,
    /// A local failure unrelated to the input
    Internal,
}

/// Errors returned by [`crate::service::WorkforceService`]
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid PIN")]
    InvalidPin,

    #[error("Worker not found")]
    WorkerNotFound,

    #[error("No verification code found")]
    CodeNotFound,

    #[error("Invalid verification code")]
    CodeMismatch,

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Time-off request not found")]
    RequestNotFound,

    #[error("Reviewer may not approve or deny time-off requests")]
    NotAReviewer,

    #[error("Time-off request was already {0}")]
    AlreadyReviewed(TimeOffStatus),

    #[error("PIN already in use")]
    PinInUse,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable, please try again")]
    Unavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_)
            | ServiceError::InvalidPin
            | ServiceError::CodeMismatch
            | ServiceError::CodeExpired
            | ServiceError::NotAReviewer => ErrorKind::Validation,
            ServiceError::WorkerNotFound
            | ServiceError::CodeNotFound
            | ServiceError::RequestNotFound => ErrorKind::NotFound,
            ServiceError::AlreadyReviewed(_)
            | ServiceError::PinInUse
            | ServiceError::Conflict(_) => ErrorKind::Conflict,
            ServiceError::Unavailable => ErrorKind::Transient,
            ServiceError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { message } => ServiceError::Conflict(message),
            StoreError::Backend { .. } => ServiceError::Unavailable,
        }
    }
}

impl From<PinHashError> for ServiceError {
    fn from(err: PinHashError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_keep_their_distinction() {
        let conflict: ServiceError = StoreError::conflict("duplicate").into();
        let backend: ServiceError = StoreError::backend("timeout").into();

        assert_eq!(conflict.kind(), ErrorKind::Conflict);
        assert_eq!(backend.kind(), ErrorKind::Transient);
        assert_eq!(backend.to_string(), "Service unavailable, please try again");
    }

    #[test]
    fn test_verification_failures_are_distinct() {
        assert_eq!(ServiceError::CodeNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ServiceError::CodeMismatch.kind(), ErrorKind::Validation);
        assert_eq!(ServiceError::CodeExpired.kind(), ErrorKind::Validation);
        assert_ne!(
            ServiceError::CodeMismatch.to_string(),
            ServiceError::CodeExpired.to_string()
        );
    }

    #[test]
    fn test_already_reviewed_names_the_status() {
        let err = ServiceError::AlreadyReviewed(TimeOffStatus::Approved);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "Time-off request was already approved");
    }
}
