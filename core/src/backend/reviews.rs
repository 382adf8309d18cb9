use async_trait::async_trait;
use fleetdash_common::BackendError;
use fleetdash_common::models::{NewReview, Review, ReviewPatch};
use fleetdash_common::ports::ReviewRepository;
use fleetdash_protocols::postgrest::{Direction, Query, QueryError, Select};

use super::client::{RestBackend, build};
use super::{BOOKINGS, CARS, PROFILES, REVIEWS};

const AUTHOR: [&str; 2] = ["first_name", "last_name"];
const CAR: [&str; 2] = ["make", "model"];
const PERIOD: [&str; 2] = ["start_date", "end_date"];

/// Which relations a review listing carries.
#[derive(Debug, Clone, Copy)]
struct Embeds {
    author: bool,
    car: bool,
    period: bool,
}

impl Embeds {
    const FULL: Embeds = Embeds {
        author: true,
        car: true,
        period: true,
    };

    fn select(self) -> Result<Select, QueryError> {
        let mut select: Select = Select::all();
        if self.author {
            select = select.embed(PROFILES, &AUTHOR)?;
        }
        if self.car {
            select = select.embed(CARS, &CAR)?;
        }
        if self.period {
            select = select.embed(BOOKINGS, &PERIOD)?;
        }
        Ok(select)
    }
}

impl RestBackend {
    async fn reviews_where(
        &self,
        embeds: Embeds,
        column: &str,
        value: &str,
    ) -> Result<Vec<Review>, BackendError> {
        let query: Query = build(|| {
            Query::table(REVIEWS)?
                .select(embeds.select()?)
                .eq(column, value)?
                .order("created_at", Direction::Desc)
        })?;
        self.fetch(&query).await
    }
}

#[async_trait]
impl ReviewRepository for RestBackend {
    async fn all(&self) -> Result<Vec<Review>, BackendError> {
        let query: Query = build(|| {
            Query::table(REVIEWS)?
                .select(Embeds::FULL.select()?)
                .order("created_at", Direction::Desc)
        })?;
        self.fetch(&query).await
    }

    async fn by_id(&self, id: &str) -> Result<Review, BackendError> {
        let query: Query = build(|| {
            Ok(Query::table(REVIEWS)?
                .select(Embeds::FULL.select()?)
                .eq("id", id)?
                .single())
        })?;
        self.fetch_one(&query, &format!("review {id}")).await
    }

    async fn by_user(&self, user_id: &str) -> Result<Vec<Review>, BackendError> {
        let embeds = Embeds {
            author: false,
            car: true,
            period: true,
        };
        self.reviews_where(embeds, "user_id", user_id).await
    }

    async fn by_booking(&self, booking_id: &str) -> Result<Review, BackendError> {
        let embeds = Embeds {
            author: true,
            car: true,
            period: false,
        };
        let query: Query = build(|| {
            Ok(Query::table(REVIEWS)?
                .select(embeds.select()?)
                .eq("booking_id", booking_id)?
                .single())
        })?;
        self.fetch_one(&query, &format!("review of booking {booking_id}"))
            .await
    }

    async fn by_car(&self, car_id: &str) -> Result<Vec<Review>, BackendError> {
        let embeds = Embeds {
            author: true,
            car: false,
            period: true,
        };
        self.reviews_where(embeds, "car_id", car_id).await
    }

    async fn create(&self, review: &NewReview) -> Result<Review, BackendError> {
        self.insert(REVIEWS, review).await
    }

    async fn update(&self, id: &str, patch: &ReviewPatch) -> Result<Review, BackendError> {
        let query: Query = build(|| Query::table(REVIEWS)?.eq("id", id))?;
        self.patch(&query, patch, &format!("review {id}")).await
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        let query: Query = build(|| Query::table(REVIEWS)?.eq("id", id))?;
        self.remove(&query, &format!("review {id}")).await
    }
}
