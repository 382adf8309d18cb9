//! Reservations and the car availability flag they drive.
//!
//! A booking write and the availability write that follows it are two separate
//! requests. The booking write decides the outcome; a failed availability
//! write is logged and left for an operator to fix with `vehicles update`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use fleetdash_common::models::pricing::quote_total;
use fleetdash_common::models::{
    Booking, BookingPatch, BookingStatus, Car, CarPatch, Identity, NewBooking,
};
use fleetdash_common::ports::{BookingRepository, CarRepository};
use tracing::{error, info, warn};

use super::Repositories;
use crate::error::{ServiceError, ServiceResult, require_id};

/// Input of [`BookingService::create`].
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// Defaults to the caller.
    pub user_id: Option<String>,
    pub car_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Quoted from the car's daily rate when absent or zero.
    pub total_amount: Option<f64>,
    pub status: Option<BookingStatus>,
}

pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    cars: Arc<dyn CarRepository>,
}

impl BookingService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            bookings: repos.bookings.clone(),
            cars: repos.cars.clone(),
        }
    }

    /// Admins see every booking, everyone else only their own.
    pub async fn list(&self, identity: &Identity) -> ServiceResult<Vec<Booking>> {
        let result = if identity.is_admin() {
            self.bookings.all().await
        } else {
            self.bookings.by_user(identity.user_id()).await
        };
        let bookings: Vec<Booking> =
            result.inspect_err(|e| error!(%e, "failed to fetch bookings"))?;
        Ok(bookings)
    }

    pub async fn get(&self, identity: &Identity, id: &str) -> ServiceResult<Booking> {
        let id: &str = require_id("booking", id)?;
        let booking: Booking = self
            .bookings
            .by_id(id)
            .await
            .inspect_err(|e| error!(id, %e, "failed to fetch booking"))?;

        if !identity.is_admin() && !identity.owns(&booking.user_id) {
            return Err(ServiceError::forbidden("you can only view your own bookings"));
        }
        Ok(booking)
    }

    /// Price of renting `car_id` over the given range at its current daily rate.
    pub async fn quote(
        &self,
        car_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<f64> {
        let car_id: &str = require_id("vehicle", car_id)?;
        let car: Car = self.cars.by_id(car_id).await?;
        Ok(quote_total(car.daily_rate, start, end))
    }

    pub async fn create(
        &self,
        identity: &Identity,
        request: BookingRequest,
    ) -> ServiceResult<Booking> {
        let car_id: &str = require_id("vehicle", &request.car_id)?;
        let user_id: String = request
            .user_id
            .unwrap_or_else(|| identity.user_id().to_string());
        if !identity.is_admin() && !identity.owns(&user_id) {
            return Err(ServiceError::forbidden("you can only book for yourself"));
        }

        let total_amount: Option<f64> = match request.total_amount {
            Some(amount) if amount != 0.0 => Some(amount),
            _ => self
                .quote(car_id, request.start_date, request.end_date)
                .await
                .inspect_err(|e| warn!(car = car_id, %e, "could not quote booking"))
                .ok(),
        };

        let row = NewBooking {
            user_id,
            car_id: car_id.to_string(),
            start_date: request.start_date,
            end_date: request.end_date,
            total_amount,
            status: request.status,
        };
        let booking: Booking = self
            .bookings
            .create(&row)
            .await
            .inspect_err(|e| error!(car = car_id, %e, "failed to create booking"))?;

        info!(id = %booking.id, car = %booking.car_id, "booking created");
        self.set_availability(&booking.car_id, false).await;
        Ok(booking)
    }

    pub async fn update(
        &self,
        identity: &Identity,
        id: &str,
        patch: &BookingPatch,
    ) -> ServiceResult<Booking> {
        let id: &str = require_id("booking", id)?;
        if patch.is_empty() {
            return Err(ServiceError::invalid("nothing to update"));
        }

        if !identity.is_admin() {
            let existing: Booking = self
                .bookings
                .by_id(id)
                .await
                .inspect_err(|e| error!(id, %e, "failed to fetch booking"))?;
            if !identity.owns(&existing.user_id) {
                return Err(ServiceError::forbidden("you can only update your own bookings"));
            }
        }

        let booking: Booking = self
            .bookings
            .update(id, patch)
            .await
            .inspect_err(|e| error!(id, %e, "failed to update booking"))?;

        if patch.releases_car() {
            self.set_availability(&booking.car_id, true).await;
        }
        Ok(booking)
    }

    pub async fn cancel(&self, identity: &Identity, id: &str) -> ServiceResult<Booking> {
        self.update(identity, id, &BookingPatch::status(BookingStatus::Cancelled))
            .await
    }

    pub async fn complete(&self, identity: &Identity, id: &str) -> ServiceResult<Booking> {
        self.update(identity, id, &BookingPatch::status(BookingStatus::Completed))
            .await
    }

    /// Admin only. Releases the car unless the booking was already closed.
    pub async fn delete(&self, identity: &Identity, id: &str) -> ServiceResult<()> {
        if !identity.is_admin() {
            return Err(ServiceError::forbidden("only admins can delete bookings"));
        }
        let id: &str = require_id("booking", id)?;

        let existing: Option<Booking> = self
            .bookings
            .by_id(id)
            .await
            .inspect_err(|e| warn!(id, %e, "could not read booking before delete"))
            .ok();

        self.bookings
            .delete(id)
            .await
            .inspect_err(|e| error!(id, %e, "failed to delete booking"))?;
        info!(id, "booking deleted");

        if let Some(booking) = existing.filter(|b| !b.status.is_closed()) {
            self.set_availability(&booking.car_id, true).await;
        }
        Ok(())
    }

    async fn set_availability(&self, car_id: &str, is_available: bool) {
        let patch: CarPatch = CarPatch::availability(is_available);
        if let Err(e) = self.cars.update(car_id, &patch).await {
            warn!(car = car_id, is_available, %e, "car availability not updated");
        }
    }
}
