use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fleetdash_common::BackendError;
use fleetdash_common::models::{Booking, BookingPatch, BookingStatus, NewBooking};
use fleetdash_common::ports::BookingRepository;
use fleetdash_protocols::postgrest::{Direction, Operator, Query, QueryError, Select};
use serde::Deserialize;

use super::client::{RestBackend, build, timestamp};
use super::{BOOKINGS, CARS, PROFILES};

const CUSTOMER_COLUMNS: [&str; 2] = ["first_name", "last_name"];
const CAR_COLUMNS: [&str; 3] = ["make", "model", "image_url"];

#[derive(Debug, Deserialize)]
struct AmountRow {
    total_amount: Option<f64>,
}

/// `*,profiles(first_name,last_name),cars(make,model,image_url)`
fn with_customer_and_car() -> Result<Select, QueryError> {
    Select::all()
        .embed(PROFILES, &CUSTOMER_COLUMNS)?
        .embed(CARS, &CAR_COLUMNS)
}

fn with_car() -> Result<Select, QueryError> {
    Select::all().embed(CARS, &CAR_COLUMNS)
}

#[async_trait]
impl BookingRepository for RestBackend {
    async fn all(&self) -> Result<Vec<Booking>, BackendError> {
        let query: Query = build(|| {
            Query::table(BOOKINGS)?
                .select(with_customer_and_car()?)
                .order("created_at", Direction::Desc)
        })?;
        self.fetch(&query).await
    }

    async fn by_id(&self, id: &str) -> Result<Booking, BackendError> {
        let query: Query = build(|| {
            Ok(Query::table(BOOKINGS)?
                .select(with_customer_and_car()?)
                .eq("id", id)?
                .single())
        })?;
        self.fetch_one(&query, &format!("booking {id}")).await
    }

    async fn by_user(&self, user_id: &str) -> Result<Vec<Booking>, BackendError> {
        let query: Query = build(|| {
            Query::table(BOOKINGS)?
                .select(with_car()?)
                .eq("user_id", user_id)?
                .order("created_at", Direction::Desc)
        })?;
        self.fetch(&query).await
    }

    async fn active(&self, now: DateTime<Utc>) -> Result<Vec<Booking>, BackendError> {
        let query: Query = build(|| {
            Query::table(BOOKINGS)?
                .gte("end_date", timestamp(now))?
                .not("status", Operator::Eq, BookingStatus::Cancelled)
        })?;
        self.fetch(&query).await
    }

    async fn amounts_since(&self, since: DateTime<Utc>) -> Result<Vec<Option<f64>>, BackendError> {
        let query: Query = build(|| {
            Query::table(BOOKINGS)?
                .select(Select::columns(&["total_amount"])?)
                .gte("start_date", timestamp(since))
        })?;
        let rows: Vec<AmountRow> = self.fetch(&query).await?;
        Ok(rows.into_iter().map(|row| row.total_amount).collect())
    }

    async fn starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Booking>, BackendError> {
        let query: Query = build(|| {
            Query::table(BOOKINGS)?
                .select(with_car()?)
                .gte("start_date", timestamp(from))?
                .lt("start_date", timestamp(to))?
                .order("start_date", Direction::Asc)
        })?;
        self.fetch(&query).await
    }

    async fn create(&self, booking: &NewBooking) -> Result<Booking, BackendError> {
        self.insert(BOOKINGS, booking).await
    }

    async fn update(&self, id: &str, patch: &BookingPatch) -> Result<Booking, BackendError> {
        let query: Query = build(|| Query::table(BOOKINGS)?.eq("id", id))?;
        self.patch(&query, patch, &format!("booking {id}")).await
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        let query: Query = build(|| Query::table(BOOKINGS)?.eq("id", id))?;
        self.remove(&query, &format!("booking {id}")).await
    }
}
