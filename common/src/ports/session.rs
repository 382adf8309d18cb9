use crate::error::BackendError;
use crate::models::Session;

/// Keeps the signed-in session between invocations.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, BackendError>;

    fn save(&self, session: &Session) -> Result<(), BackendError>;

    fn clear(&self) -> Result<(), BackendError>;
}
