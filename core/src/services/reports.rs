use std::sync::Arc;

use chrono::{DateTime, Utc};
use fleetdash_common::models::report::{
    BookingTrends, FleetUtilization, RevenueReport, TrendPeriod,
};
use fleetdash_common::models::{Booking, Car, Identity};
use fleetdash_common::ports::{BookingRepository, CarRepository};
use tracing::error;

use super::Repositories;
use crate::error::{ServiceError, ServiceResult};

/// Revenue, booking trend and fleet reports. Admin only.
pub struct ReportService {
    bookings: Arc<dyn BookingRepository>,
    cars: Arc<dyn CarRepository>,
}

impl ReportService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            bookings: repos.bookings.clone(),
            cars: repos.cars.clone(),
        }
    }

    /// Revenue of bookings starting in `[from, to)`.
    pub async fn revenue(
        &self,
        identity: &Identity,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ServiceResult<RevenueReport> {
        let bookings: Vec<Booking> = self.window(identity, from, to).await?;
        Ok(RevenueReport::build(from, to, &bookings))
    }

    /// Bookings starting in `[from, to)`, counted per `period` and status.
    pub async fn trends(
        &self,
        identity: &Identity,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        period: TrendPeriod,
    ) -> ServiceResult<BookingTrends> {
        let bookings: Vec<Booking> = self.window(identity, from, to).await?;
        Ok(BookingTrends::build(from, to, period, &bookings))
    }

    async fn window(
        &self,
        identity: &Identity,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ServiceResult<Vec<Booking>> {
        if !identity.is_admin() {
            return Err(ServiceError::forbidden("only admins can view reports"));
        }
        if from >= to {
            return Err(ServiceError::invalid("report window must end after it starts"));
        }

        let bookings: Vec<Booking> = self
            .bookings
            .starting_between(from, to)
            .await
            .inspect_err(|e| error!(%e, "failed to fetch bookings for report"))?;
        Ok(bookings)
    }

    pub async fn utilization(&self, identity: &Identity) -> ServiceResult<FleetUtilization> {
        if !identity.is_admin() {
            return Err(ServiceError::forbidden("only admins can view reports"));
        }
        let cars: Vec<Car> = self
            .cars
            .all()
            .await
            .inspect_err(|e| error!(%e, "failed to fetch fleet for report"))?;
        Ok(FleetUtilization::from_cars(&cars))
    }
}
