use async_trait::async_trait;
use fleetdash_common::BackendError;
use fleetdash_common::models::{Car, CarPatch, NewCar};
use fleetdash_common::ports::CarRepository;
use fleetdash_protocols::postgrest::{Direction, Query};

use super::CARS;
use super::client::{RestBackend, build};

#[async_trait]
impl CarRepository for RestBackend {
    async fn all(&self) -> Result<Vec<Car>, BackendError> {
        let query: Query = build(|| Query::table(CARS)?.order("created_at", Direction::Desc))?;
        self.fetch(&query).await
    }

    async fn available(&self) -> Result<Vec<Car>, BackendError> {
        let query: Query = build(|| {
            Query::table(CARS)?
                .eq("is_available", true)?
                .order("created_at", Direction::Desc)
        })?;
        self.fetch(&query).await
    }

    async fn by_id(&self, id: &str) -> Result<Car, BackendError> {
        let query: Query = build(|| Ok(Query::table(CARS)?.eq("id", id)?.single()))?;
        self.fetch_one(&query, &format!("car {id}")).await
    }

    async fn create(&self, car: &NewCar) -> Result<Car, BackendError> {
        self.insert(CARS, car).await
    }

    async fn update(&self, id: &str, patch: &CarPatch) -> Result<Car, BackendError> {
        let query: Query = build(|| Query::table(CARS)?.eq("id", id))?;
        self.patch(&query, patch, &format!("car {id}")).await
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        let query: Query = build(|| Query::table(CARS)?.eq("id", id))?;
        self.remove(&query, &format!("car {id}")).await
    }
}
