use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::BackendError;
use crate::models::{Booking, BookingPatch, NewBooking};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Every booking with customer and car summaries, newest first.
    async fn all(&self) -> Result<Vec<Booking>, BackendError>;

    async fn by_id(&self, id: &str) -> Result<Booking, BackendError>;

    /// Bookings of one customer with car summaries, newest first.
    async fn by_user(&self, user_id: &str) -> Result<Vec<Booking>, BackendError>;

    /// Bookings ending at or after `now` that are not cancelled.
    async fn active(&self, now: DateTime<Utc>) -> Result<Vec<Booking>, BackendError>;

    /// `total_amount` of every booking starting at or after `since`.
    async fn amounts_since(&self, since: DateTime<Utc>) -> Result<Vec<Option<f64>>, BackendError>;

    /// Bookings starting inside `[from, to)` with car summaries.
    async fn starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Booking>, BackendError>;

    async fn create(&self, booking: &NewBooking) -> Result<Booking, BackendError>;

    async fn update(&self, id: &str, patch: &BookingPatch) -> Result<Booking, BackendError>;

    async fn delete(&self, id: &str) -> Result<(), BackendError>;
}
