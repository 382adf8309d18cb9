use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{NewReview, Review, ReviewPatch};

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn all(&self) -> Result<Vec<Review>, BackendError>;

    async fn by_id(&self, id: &str) -> Result<Review, BackendError>;

    async fn by_user(&self, user_id: &str) -> Result<Vec<Review>, BackendError>;

    /// The single review left for a booking.
    async fn by_booking(&self, booking_id: &str) -> Result<Review, BackendError>;

    async fn by_car(&self, car_id: &str) -> Result<Vec<Review>, BackendError>;

    async fn create(&self, review: &NewReview) -> Result<Review, BackendError>;

    async fn update(&self, id: &str, patch: &ReviewPatch) -> Result<Review, BackendError>;

    async fn delete(&self, id: &str) -> Result<(), BackendError>;
}
