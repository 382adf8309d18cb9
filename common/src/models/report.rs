use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Months, NaiveTime, Utc};
use serde::Serialize;

use super::stats::{start_of_month, utilization_rate};
use super::{Booking, BookingStatus, Car};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarRevenue {
    pub car_id: String,
    pub label: String,
    pub bookings: usize,
    pub revenue: f64,
}

/// Revenue earned by bookings starting inside `[from, to)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueReport {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    /// Bookings that count towards revenue (everything except cancelled).
    pub bookings: usize,
    pub total_revenue: f64,
    /// Every booking in the window, cancelled ones included.
    pub by_status: BTreeMap<BookingStatus, usize>,
    /// Highest earner first.
    pub by_car: Vec<CarRevenue>,
}

impl RevenueReport {
    pub fn build(from: DateTime<Utc>, to: DateTime<Utc>, bookings: &[Booking]) -> Self {
        let in_window: Vec<&Booking> = bookings
            .iter()
            .filter(|b| b.start_date >= from && b.start_date < to)
            .collect();

        let mut by_status: BTreeMap<BookingStatus, usize> = BTreeMap::new();
        for booking in &in_window {
            *by_status.entry(booking.status).or_insert(0) += 1;
        }

        let earning: Vec<&Booking> = in_window
            .into_iter()
            .filter(|b| b.status != BookingStatus::Cancelled)
            .collect();

        let mut per_car: HashMap<&str, CarRevenue> = HashMap::new();
        for booking in &earning {
            let entry = per_car
                .entry(booking.car_id.as_str())
                .or_insert_with(|| CarRevenue {
                    car_id: booking.car_id.clone(),
                    label: booking.car_label(),
                    bookings: 0,
                    revenue: 0.0,
                });
            entry.bookings += 1;
            entry.revenue += booking.amount();
        }

        let mut by_car: Vec<CarRevenue> = per_car.into_values().collect();
        by_car.sort_by(|a, b| {
            b.revenue
                .total_cmp(&a.revenue)
                .then_with(|| a.car_id.cmp(&b.car_id))
        });

        Self {
            from,
            to,
            bookings: earning.len(),
            total_revenue: earning.iter().map(|b| b.amount()).sum(),
            by_status,
            by_car,
        }
    }

    pub fn average_booking_value(&self) -> f64 {
        if self.bookings == 0 {
            return 0.0;
        }
        self.total_revenue / self.bookings as f64
    }
}

/// Snapshot of how much of the fleet is rented out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetUtilization {
    pub total: usize,
    pub available: usize,
    pub rented: usize,
    pub utilization_rate: f64,
    /// Average daily rate over the whole fleet.
    pub average_daily_rate: f64,
}

impl FleetUtilization {
    pub fn from_cars(cars: &[Car]) -> Self {
        let total: usize = cars.len();
        let available: usize = cars.iter().filter(|c| c.is_available).count();
        let average_daily_rate: f64 = if total == 0 {
            0.0
        } else {
            cars.iter().map(|c| c.daily_rate).sum::<f64>() / total as f64
        };

        Self {
            total,
            available,
            rented: total - available,
            utilization_rate: utilization_rate(total, available),
            average_daily_rate,
        }
    }
}

/// Bucket size of a [`BookingTrends`] report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    Day,
    Month,
}

impl TrendPeriod {
    /// Start of the bucket holding `at`, in UTC.
    pub fn floor(self, at: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            TrendPeriod::Day => at.date_naive().and_time(NaiveTime::MIN).and_utc(),
            TrendPeriod::Month => start_of_month(at),
        }
    }

    fn next(self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TrendPeriod::Day => start.checked_add_signed(Duration::days(1)),
            TrendPeriod::Month => start.checked_add_months(Months::new(1)),
        }
    }

    pub fn label(self, start: &DateTime<Utc>) -> String {
        match self {
            TrendPeriod::Day => start.format("%Y-%m-%d").to_string(),
            TrendPeriod::Month => start.format("%Y-%m").to_string(),
        }
    }
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrendPeriod::Day => "day",
            TrendPeriod::Month => "month",
        })
    }
}

impl FromStr for TrendPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(TrendPeriod::Day),
            "month" | "monthly" => Ok(TrendPeriod::Month),
            _ => Err(format!("unknown period: {s} (expected day or month)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendBucket {
    pub start: DateTime<Utc>,
    /// Bookings starting in this bucket, cancelled ones included.
    pub total: usize,
    pub by_status: BTreeMap<BookingStatus, usize>,
}

impl TrendBucket {
    pub fn count(&self, status: BookingStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Bookings starting inside `[from, to)`, counted per day or month and status.
///
/// Every bucket touching the window is listed, empty ones included, so gaps
/// show up as zeros.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingTrends {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub period: TrendPeriod,
    pub buckets: Vec<TrendBucket>,
}

impl BookingTrends {
    pub fn build(
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        period: TrendPeriod,
        bookings: &[Booking],
    ) -> Self {
        let mut buckets: Vec<TrendBucket> = Vec::new();
        let mut start: DateTime<Utc> = period.floor(from);
        while start < to {
            buckets.push(TrendBucket {
                start,
                total: 0,
                by_status: BTreeMap::new(),
            });
            match period.next(start) {
                Some(next) => start = next,
                None => break,
            }
        }

        for booking in bookings
            .iter()
            .filter(|b| b.start_date >= from && b.start_date < to)
        {
            let key: DateTime<Utc> = period.floor(booking.start_date);
            if let Ok(idx) = buckets.binary_search_by_key(&key, |bucket| bucket.start) {
                let bucket: &mut TrendBucket = &mut buckets[idx];
                bucket.total += 1;
                *bucket.by_status.entry(booking.status).or_insert(0) += 1;
            }
        }

        Self {
            from,
            to,
            period,
            buckets,
        }
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.total).sum()
    }

    /// Bucket with the most bookings; the earliest one wins a tie.
    pub fn busiest(&self) -> Option<&TrendBucket> {
        self.buckets
            .iter()
            .filter(|b| b.total > 0)
            .fold(None, |best: Option<&TrendBucket>, bucket| match best {
                Some(best) if best.total >= bucket.total => Some(best),
                _ => Some(bucket),
            })
    }
}
