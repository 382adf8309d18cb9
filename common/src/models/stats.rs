use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;

use super::{Booking, Car, Profile};

/// Counters shown on the dashboard landing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_vehicles: usize,
    pub available_vehicles: usize,
    pub active_bookings: usize,
    pub total_customers: usize,
    pub monthly_revenue: f64,
    /// Share of the fleet currently rented out, in percent with one decimal.
    pub utilization_rate: f64,
}

/// Rows fetched for one dashboard refresh.
#[derive(Debug, Clone, Default)]
pub struct StatsSources {
    pub cars: Vec<Car>,
    pub available_cars: Vec<Car>,
    pub active_bookings: Vec<Booking>,
    pub customers: Vec<Profile>,
    /// `total_amount` of every booking starting this month.
    pub monthly_amounts: Vec<Option<f64>>,
}

impl DashboardStats {
    pub fn compute(sources: &StatsSources) -> Self {
        let total: usize = sources.cars.len();
        let available: usize = sources.available_cars.len();
        let monthly_revenue: f64 = sources.monthly_amounts.iter().flatten().sum();

        Self {
            total_vehicles: total,
            available_vehicles: available,
            active_bookings: sources.active_bookings.len(),
            total_customers: sources.customers.len(),
            monthly_revenue,
            utilization_rate: utilization_rate(total, available),
        }
    }
}

/// `(total - available) / total` as a percentage rounded to one decimal.
pub fn utilization_rate(total: usize, available: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rented: f64 = total.saturating_sub(available) as f64;
    round_one_decimal(rented / total as f64 * 100.0)
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Midnight UTC on the first day of `now`'s month.
pub fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}
