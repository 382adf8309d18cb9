use chrono::{DateTime, Utc};

const DAY_MS: f64 = 86_400_000.0;

/// Number of billable days between two instants. Partial days round up.
pub fn rental_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let ms: f64 = (end - start).num_milliseconds() as f64;
    (ms / DAY_MS).ceil() as i64
}

/// Price of renting a car at `daily_rate` from `start` to `end`.
pub fn quote_total(daily_rate: f64, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    daily_rate * rental_days(start, end) as f64
}
