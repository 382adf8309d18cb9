use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{Car, CarPatch, NewCar};

#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Whole fleet, newest first.
    async fn all(&self) -> Result<Vec<Car>, BackendError>;

    /// Cars with `is_available = true`, newest first.
    async fn available(&self) -> Result<Vec<Car>, BackendError>;

    async fn by_id(&self, id: &str) -> Result<Car, BackendError>;

    async fn create(&self, car: &NewCar) -> Result<Car, BackendError>;

    async fn update(&self, id: &str, patch: &CarPatch) -> Result<Car, BackendError>;

    async fn delete(&self, id: &str) -> Result<(), BackendError>;
}
