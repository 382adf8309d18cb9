use async_trait::async_trait;
use fleetdash_common::BackendError;
use fleetdash_common::models::{NewProfile, Profile, ProfilePatch};
use fleetdash_common::ports::ProfileRepository;
use fleetdash_protocols::postgrest::{Direction, Query};

use super::PROFILES;
use super::client::{RestBackend, build};

#[async_trait]
impl ProfileRepository for RestBackend {
    async fn all(&self) -> Result<Vec<Profile>, BackendError> {
        let query: Query =
            build(|| Query::table(PROFILES)?.order("created_at", Direction::Desc))?;
        self.fetch(&query).await
    }

    async fn by_id(&self, id: &str) -> Result<Profile, BackendError> {
        let query: Query = build(|| Ok(Query::table(PROFILES)?.eq("id", id)?.single()))?;
        self.fetch_one(&query, &format!("profile {id}")).await
    }

    async fn create(&self, profile: &NewProfile) -> Result<Profile, BackendError> {
        self.insert(PROFILES, profile).await
    }

    async fn update(&self, id: &str, patch: &ProfilePatch) -> Result<Profile, BackendError> {
        let query: Query = build(|| Query::table(PROFILES)?.eq("id", id))?;
        self.patch(&query, patch, &format!("profile {id}")).await
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        let query: Query = build(|| Query::table(PROFILES)?.eq("id", id))?;
        self.remove(&query, &format!("profile {id}")).await
    }
}
