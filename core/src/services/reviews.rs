use std::sync::Arc;

use fleetdash_common::models::{Identity, NewReview, Review, ReviewPatch};
use fleetdash_common::ports::ReviewRepository;
use tracing::{error, info};

use super::Repositories;
use crate::error::{ServiceError, ServiceResult, require_id};

/// Input of [`ReviewService::create`].
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    /// Defaults to the caller.
    pub user_id: Option<String>,
    pub car_id: String,
    pub booking_id: Option<String>,
    pub rating: i32,
    pub comment: Option<String>,
}

pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            reviews: repos.reviews.clone(),
        }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .reviews
            .all()
            .await
            .inspect_err(|e| error!(%e, "failed to fetch reviews"))?;
        Ok(reviews)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Review> {
        let id: &str = require_id("review", id)?;
        let review: Review = self
            .reviews
            .by_id(id)
            .await
            .inspect_err(|e| error!(id, %e, "failed to fetch review"))?;
        Ok(review)
    }

    pub async fn for_user(&self, user_id: &str) -> ServiceResult<Vec<Review>> {
        let user_id: &str = require_id("customer", user_id)?;
        let reviews: Vec<Review> = self
            .reviews
            .by_user(user_id)
            .await
            .inspect_err(|e| error!(user = user_id, %e, "failed to fetch reviews"))?;
        Ok(reviews)
    }

    pub async fn for_booking(&self, booking_id: &str) -> ServiceResult<Review> {
        let booking_id: &str = require_id("booking", booking_id)?;
        let review: Review = self
            .reviews
            .by_booking(booking_id)
            .await
            .inspect_err(|e| error!(booking = booking_id, %e, "failed to fetch review"))?;
        Ok(review)
    }

    pub async fn for_car(&self, car_id: &str) -> ServiceResult<Vec<Review>> {
        let car_id: &str = require_id("vehicle", car_id)?;
        let reviews: Vec<Review> = self
            .reviews
            .by_car(car_id)
            .await
            .inspect_err(|e| error!(car = car_id, %e, "failed to fetch reviews"))?;
        Ok(reviews)
    }

    pub async fn create(&self, identity: &Identity, request: ReviewRequest) -> ServiceResult<Review> {
        let car_id: &str = require_id("vehicle", &request.car_id)?;
        let user_id: String = request
            .user_id
            .unwrap_or_else(|| identity.user_id().to_string());
        if !identity.is_admin() && !identity.owns(&user_id) {
            return Err(ServiceError::forbidden("you can only review as yourself"));
        }

        let row = NewReview {
            user_id,
            car_id: car_id.to_string(),
            booking_id: request.booking_id,
            rating: request.rating,
            comment: request.comment,
        };
        let review: Review = self
            .reviews
            .create(&row)
            .await
            .inspect_err(|e| error!(car = car_id, %e, "failed to create review"))?;
        info!(id = %review.id, car = %review.car_id, "review added");
        Ok(review)
    }

    pub async fn update(
        &self,
        identity: &Identity,
        id: &str,
        patch: &ReviewPatch,
    ) -> ServiceResult<Review> {
        if patch.is_empty() {
            return Err(ServiceError::invalid("nothing to update"));
        }
        let review: Review = self.authored(identity, id).await?;
        let updated: Review = self
            .reviews
            .update(&review.id, patch)
            .await
            .inspect_err(|e| error!(id = %review.id, %e, "failed to update review"))?;
        Ok(updated)
    }

    pub async fn delete(&self, identity: &Identity, id: &str) -> ServiceResult<()> {
        let review: Review = self.authored(identity, id).await?;
        self.reviews
            .delete(&review.id)
            .await
            .inspect_err(|e| error!(id = %review.id, %e, "failed to delete review"))?;
        info!(id = %review.id, "review removed");
        Ok(())
    }

    /// Loads a review the caller may change: their own, or any for admins.
    async fn authored(&self, identity: &Identity, id: &str) -> ServiceResult<Review> {
        let review: Review = self.get(id).await?;
        if !identity.is_admin() && !identity.owns(&review.user_id) {
            return Err(ServiceError::forbidden("you can only change your own reviews"));
        }
        Ok(review)
    }
}
