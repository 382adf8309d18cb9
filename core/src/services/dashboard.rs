use std::sync::Arc;

use chrono::{DateTime, Utc};
use fleetdash_common::models::stats::{StatsSources, start_of_month};
use fleetdash_common::models::{DashboardStats, Identity};
use fleetdash_common::ports::{BookingRepository, CarRepository, ProfileRepository};
use tracing::{debug, error};

use super::Repositories;
use crate::error::ServiceResult;

/// Counters of the landing screen.
pub struct DashboardService {
    cars: Arc<dyn CarRepository>,
    bookings: Arc<dyn BookingRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl DashboardService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            cars: repos.cars.clone(),
            bookings: repos.bookings.clone(),
            profiles: repos.profiles.clone(),
        }
    }

    /// Runs the five dashboard queries concurrently. Any failure fails the refresh.
    pub async fn stats(&self, identity: &Identity, now: DateTime<Utc>) -> ServiceResult<DashboardStats> {
        debug!(user = identity.user_id(), "refreshing dashboard");
        let month_start: DateTime<Utc> = start_of_month(now);

        let (cars, available_cars, active_bookings, customers, monthly_amounts) = tokio::try_join!(
            self.cars.all(),
            self.cars.available(),
            self.bookings.active(now),
            self.profiles.all(),
            self.bookings.amounts_since(month_start),
        )
        .inspect_err(|e| error!(%e, "dashboard refresh failed"))?;

        let sources = StatsSources {
            cars,
            available_cars,
            active_bookings,
            customers,
            monthly_amounts,
        };
        Ok(DashboardStats::compute(&sources))
    }
}
