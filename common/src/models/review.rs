use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::booking::{CarSummary, CustomerSummary};

/// Booking columns embedded into review rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingPeriod {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub car_id: String,
    #[serde(default)]
    pub booking_id: Option<String>,
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<CustomerSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cars: Option<CarSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookings: Option<BookingPeriod>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub user_id: String,
    pub car_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ReviewPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, review: &mut Review) {
        if let Some(rating) = self.rating {
            review.rating = rating;
        }
        if let Some(comment) = &self.comment {
            review.comment = Some(comment.clone());
        }
    }
}
