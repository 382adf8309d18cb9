use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{NewProfile, Profile, ProfilePatch};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn all(&self) -> Result<Vec<Profile>, BackendError>;

    async fn by_id(&self, id: &str) -> Result<Profile, BackendError>;

    async fn create(&self, profile: &NewProfile) -> Result<Profile, BackendError>;

    async fn update(&self, id: &str, patch: &ProfilePatch) -> Result<Profile, BackendError>;

    async fn delete(&self, id: &str) -> Result<(), BackendError>;
}
