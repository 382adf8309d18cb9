use std::sync::Arc;

use fleetdash_common::models::{Car, CarPatch, NewCar};
use fleetdash_common::ports::CarRepository;
use tracing::{error, info};

use super::Repositories;
use crate::error::{ServiceError, ServiceResult, require_id};

/// Fleet inventory.
pub struct VehicleService {
    cars: Arc<dyn CarRepository>,
}

impl VehicleService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            cars: repos.cars.clone(),
        }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Car>> {
        let cars: Vec<Car> = self
            .cars
            .all()
            .await
            .inspect_err(|e| error!(%e, "failed to fetch vehicles"))?;
        Ok(cars)
    }

    pub async fn list_available(&self) -> ServiceResult<Vec<Car>> {
        let cars: Vec<Car> = self
            .cars
            .available()
            .await
            .inspect_err(|e| error!(%e, "failed to fetch available vehicles"))?;
        Ok(cars)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Car> {
        let id: &str = require_id("vehicle", id)?;
        let car: Car = self
            .cars
            .by_id(id)
            .await
            .inspect_err(|e| error!(id, %e, "failed to fetch vehicle"))?;
        Ok(car)
    }

    pub async fn create(&self, car: &NewCar) -> ServiceResult<Car> {
        let created: Car = self
            .cars
            .create(car)
            .await
            .inspect_err(|e| error!(%e, "failed to create vehicle"))?;
        info!(id = %created.id, plate = %created.license_plate, "vehicle added");
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: &CarPatch) -> ServiceResult<Car> {
        let id: &str = require_id("vehicle", id)?;
        if patch.is_empty() {
            return Err(ServiceError::invalid("nothing to update"));
        }
        let car: Car = self
            .cars
            .update(id, patch)
            .await
            .inspect_err(|e| error!(id, %e, "failed to update vehicle"))?;
        Ok(car)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let id: &str = require_id("vehicle", id)?;
        self.cars
            .delete(id)
            .await
            .inspect_err(|e| error!(id, %e, "failed to delete vehicle"))?;
        info!(id, "vehicle removed");
        Ok(())
    }
}
