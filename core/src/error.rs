use fleetdash_common::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not signed in, run `fleetdash login` first")]
    NotAuthenticated,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ServiceError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        ServiceError::Forbidden(reason.into())
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        ServiceError::InvalidInput(reason.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Guards against blank ids before they reach a filter.
pub(crate) fn require_id<'a>(kind: &str, id: &'a str) -> ServiceResult<&'a str> {
    let id: &str = id.trim();
    if id.is_empty() {
        return Err(ServiceError::invalid(format!("missing {kind} id")));
    }
    Ok(id)
}
