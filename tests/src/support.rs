//! In-memory stand-ins for the backend ports.
//!
//! [`MemoryBackend`] keeps every table in one [`State`] behind a tokio mutex and
//! mimics the embeds the HTTP adapter asks for, so services can be exercised
//! end to end without a network.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use fleetdash_common::BackendError;
use fleetdash_common::models::{
    AuthUser, Booking, BookingPatch, BookingPeriod, BookingStatus, Car, CarPatch, CarSummary,
    CustomerSummary, Identity, NewBooking, NewCar, NewProfile, NewReview, Profile, ProfilePatch,
    Review, ReviewPatch, Session,
};
use fleetdash_common::ports::{
    AuthGateway, BookingRepository, CarRepository, ProfileRepository, ReviewRepository,
    SessionStore, SignUp, SignUpOutcome,
};
use fleetdash_core::services::Repositories;
use tokio::sync::Mutex;

pub const SESSION_TTL_SECS: i64 = 3600;

/// Fixed clock for rows created by the fixtures.
pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

#[derive(Default)]
pub struct State {
    pub cars: Vec<Car>,
    pub bookings: Vec<Booking>,
    pub profiles: Vec<Profile>,
    pub reviews: Vec<Review>,

    /// email -> (password, user)
    pub users: HashMap<String, (String, AuthUser)>,
    /// access token -> session
    pub sessions: HashMap<String, Session>,
    pub sign_outs: usize,

    /// Sign-up answers without a session, as with e-mail confirmation on.
    pub confirm_email: bool,
    pub fail_car_updates: bool,
    pub fail_profile_inserts: bool,
    pub fail_bookings: bool,

    next_id: usize,
}

impl State {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn issue(&mut self, user: &AuthUser) -> Session {
        let access: String = self.id("at");
        let refresh: String = self.id("rt");
        let session = Session {
            access_token: access.clone(),
            refresh_token: refresh,
            expires_at: Utc::now().timestamp() + SESSION_TTL_SECS,
            user: user.clone(),
        };
        self.sessions.insert(access, session.clone());
        session
    }

    fn customer_summary(&self, user_id: &str) -> Option<CustomerSummary> {
        self.profiles
            .iter()
            .find(|p| p.id == user_id)
            .map(|p| CustomerSummary {
                first_name: p.first_name.clone(),
                last_name: p.last_name.clone(),
            })
    }

    fn car_summary(&self, car_id: &str) -> Option<CarSummary> {
        self.cars.iter().find(|c| c.id == car_id).map(|c| CarSummary {
            make: c.make.clone(),
            model: c.model.clone(),
            image_url: c.image_url.clone(),
        })
    }

    fn joined_booking(&self, booking: &Booking) -> Booking {
        let mut joined: Booking = booking.clone();
        joined.profiles = self.customer_summary(&booking.user_id);
        joined.cars = self.car_summary(&booking.car_id);
        joined
    }

    fn joined_review(&self, review: &Review) -> Review {
        let mut joined: Review = review.clone();
        joined.profiles = self.customer_summary(&review.user_id);
        joined.cars = self.car_summary(&review.car_id);
        joined.bookings = review
            .booking_id
            .as_deref()
            .and_then(|id| self.bookings.iter().find(|b| b.id == id))
            .map(|b| BookingPeriod {
                start_date: b.start_date,
                end_date: b.end_date,
            });
        joined
    }
}

fn not_found(what: &str, id: &str) -> BackendError {
    BackendError::NotFound(format!("{what} {id}"))
}

fn newest_first<T, F>(rows: &mut [T], created: F)
where
    F: Fn(&T) -> DateTime<Utc>,
{
    rows.sort_by_key(|row| std::cmp::Reverse(created(row)));
}

#[derive(Default)]
pub struct MemoryBackend {
    pub state: Mutex<State>,
    adopted: StdMutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            cars: self.clone(),
            bookings: self.clone(),
            profiles: self.clone(),
            reviews: self.clone(),
            auth: self.clone(),
        }
    }

    /// Access token data requests currently run with.
    pub fn adopted(&self) -> Option<String> {
        self.adopted.lock().ok().and_then(|t| t.clone())
    }

    pub async fn add_car(&self, make: &str, model: &str, rate: f64, available: bool) -> Car {
        let mut state = self.state.lock().await;
        let car = Car {
            id: state.id("car"),
            make: make.to_string(),
            model: model.to_string(),
            year: 2022,
            license_plate: format!("{}-{}", &make[..1], state.cars.len() + 100),
            daily_rate: rate,
            is_available: available,
            image_url: None,
            created_at: at(2024, 1, 1) + Duration::minutes(state.cars.len() as i64),
        };
        state.cars.push(car.clone());
        car
    }

    pub async fn add_profile(&self, id: &str, first: &str, is_admin: bool) -> Profile {
        let mut state = self.state.lock().await;
        let profile = Profile {
            id: id.to_string(),
            first_name: Some(first.to_string()),
            last_name: Some("Tester".to_string()),
            phone_number: None,
            is_admin,
            created_at: at(2024, 1, 1) + Duration::minutes(state.profiles.len() as i64),
            updated_at: None,
        };
        state.profiles.push(profile.clone());
        profile
    }

    pub async fn add_user(&self, email: &str, password: &str) -> AuthUser {
        let mut state = self.state.lock().await;
        let user = AuthUser {
            id: state.id("user"),
            email: Some(email.to_string()),
        };
        state
            .users
            .insert(email.to_string(), (password.to_string(), user.clone()));
        user
    }

    pub async fn add_booking(
        &self,
        user_id: &str,
        car_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        amount: Option<f64>,
        status: BookingStatus,
    ) -> Booking {
        let mut state = self.state.lock().await;
        let booking = Booking {
            id: state.id("booking"),
            user_id: user_id.to_string(),
            car_id: car_id.to_string(),
            start_date: start,
            end_date: end,
            total_amount: amount,
            status,
            created_at: start,
            profiles: None,
            cars: None,
        };
        state.bookings.push(booking.clone());
        booking
    }

    pub async fn car(&self, id: &str) -> Car {
        let state = self.state.lock().await;
        state
            .cars
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .expect("car fixture exists")
    }
}

/// Caller with a profile row.
pub fn identity(profile: &Profile) -> Identity {
    Identity::new(
        AuthUser {
            id: profile.id.clone(),
            email: Some(format!("{}@rent.test", profile.id)),
        },
        Some(profile.clone()),
    )
}

#[async_trait]
impl CarRepository for MemoryBackend {
    async fn all(&self) -> Result<Vec<Car>, BackendError> {
        let mut cars: Vec<Car> = self.state.lock().await.cars.clone();
        newest_first(&mut cars, |c| c.created_at);
        Ok(cars)
    }

    async fn available(&self) -> Result<Vec<Car>, BackendError> {
        let mut cars: Vec<Car> = CarRepository::all(self).await?;
        cars.retain(|c| c.is_available);
        Ok(cars)
    }

    async fn by_id(&self, id: &str) -> Result<Car, BackendError> {
        let state = self.state.lock().await;
        state
            .cars
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found("car", id))
    }

    async fn create(&self, car: &NewCar) -> Result<Car, BackendError> {
        let mut state = self.state.lock().await;
        let created = Car {
            id: state.id("car"),
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year,
            license_plate: car.license_plate.clone(),
            daily_rate: car.daily_rate,
            is_available: car.is_available,
            image_url: car.image_url.clone(),
            created_at: Utc::now(),
        };
        state.cars.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &CarPatch) -> Result<Car, BackendError> {
        let mut state = self.state.lock().await;
        if state.fail_car_updates {
            return Err(BackendError::Transport("connection reset".to_string()));
        }
        let car: &mut Car = state
            .cars
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("car", id))?;
        patch.apply(car);
        Ok(car.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.state.lock().await.cars.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MemoryBackend {
    async fn all(&self) -> Result<Vec<Booking>, BackendError> {
        let state = self.state.lock().await;
        if state.fail_bookings {
            return Err(BackendError::Api {
                status: 500,
                code: None,
                message: "bookings unavailable".to_string(),
            });
        }
        let mut bookings: Vec<Booking> =
            state.bookings.iter().map(|b| state.joined_booking(b)).collect();
        newest_first(&mut bookings, |b| b.created_at);
        Ok(bookings)
    }

    async fn by_id(&self, id: &str) -> Result<Booking, BackendError> {
        let state = self.state.lock().await;
        state
            .bookings
            .iter()
            .find(|b| b.id == id)
            .map(|b| state.joined_booking(b))
            .ok_or_else(|| not_found("booking", id))
    }

    async fn by_user(&self, user_id: &str) -> Result<Vec<Booking>, BackendError> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(|b| {
                let mut joined: Booking = state.joined_booking(b);
                joined.profiles = None;
                joined
            })
            .collect();
        newest_first(&mut bookings, |b| b.created_at);
        Ok(bookings)
    }

    async fn active(&self, now: DateTime<Utc>) -> Result<Vec<Booking>, BackendError> {
        let state = self.state.lock().await;
        if state.fail_bookings {
            return Err(BackendError::Transport("timed out".to_string()));
        }
        Ok(state
            .bookings
            .iter()
            .filter(|b| b.end_date >= now && b.status != BookingStatus::Cancelled)
            .cloned()
            .collect())
    }

    async fn amounts_since(&self, since: DateTime<Utc>) -> Result<Vec<Option<f64>>, BackendError> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .iter()
            .filter(|b| b.start_date >= since)
            .map(|b| b.total_amount)
            .collect())
    }

    async fn starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Booking>, BackendError> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .iter()
            .filter(|b| b.start_date >= from && b.start_date < to)
            .map(|b| state.joined_booking(b))
            .collect())
    }

    async fn create(&self, booking: &NewBooking) -> Result<Booking, BackendError> {
        let mut state = self.state.lock().await;
        let created = Booking {
            id: state.id("booking"),
            user_id: booking.user_id.clone(),
            car_id: booking.car_id.clone(),
            start_date: booking.start_date,
            end_date: booking.end_date,
            total_amount: booking.total_amount,
            status: booking.status.unwrap_or_default(),
            created_at: Utc::now(),
            profiles: None,
            cars: None,
        };
        state.bookings.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &BookingPatch) -> Result<Booking, BackendError> {
        let mut state = self.state.lock().await;
        let booking: &mut Booking = state
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("booking", id))?;
        patch.apply(booking);
        Ok(booking.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.state.lock().await.bookings.retain(|b| b.id != id);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryBackend {
    async fn all(&self) -> Result<Vec<Profile>, BackendError> {
        let mut profiles: Vec<Profile> = self.state.lock().await.profiles.clone();
        newest_first(&mut profiles, |p| p.created_at);
        Ok(profiles)
    }

    async fn by_id(&self, id: &str) -> Result<Profile, BackendError> {
        let state = self.state.lock().await;
        state
            .profiles
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found("profile", id))
    }

    async fn create(&self, profile: &NewProfile) -> Result<Profile, BackendError> {
        let mut state = self.state.lock().await;
        if state.fail_profile_inserts {
            return Err(BackendError::Api {
                status: 403,
                code: Some("42501".to_string()),
                message: "new row violates row-level security policy".to_string(),
            });
        }
        let created = Profile {
            id: profile.id.clone(),
            first_name: Some(profile.first_name.clone()),
            last_name: Some(profile.last_name.clone()),
            phone_number: Some(profile.phone_number.clone()),
            is_admin: profile.is_admin,
            created_at: profile.created_at,
            updated_at: Some(profile.updated_at),
        };
        state.profiles.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &ProfilePatch) -> Result<Profile, BackendError> {
        let mut state = self.state.lock().await;
        let profile: &mut Profile = state
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("profile", id))?;
        patch.apply(profile);
        Ok(profile.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.state.lock().await.profiles.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for MemoryBackend {
    async fn all(&self) -> Result<Vec<Review>, BackendError> {
        let state = self.state.lock().await;
        let mut reviews: Vec<Review> =
            state.reviews.iter().map(|r| state.joined_review(r)).collect();
        newest_first(&mut reviews, |r| r.created_at);
        Ok(reviews)
    }

    async fn by_id(&self, id: &str) -> Result<Review, BackendError> {
        let state = self.state.lock().await;
        state
            .reviews
            .iter()
            .find(|r| r.id == id)
            .map(|r| state.joined_review(r))
            .ok_or_else(|| not_found("review", id))
    }

    async fn by_user(&self, user_id: &str) -> Result<Vec<Review>, BackendError> {
        let mut reviews: Vec<Review> = ReviewRepository::all(self).await?;
        reviews.retain(|r| r.user_id == user_id);
        Ok(reviews)
    }

    async fn by_booking(&self, booking_id: &str) -> Result<Review, BackendError> {
        ReviewRepository::all(self)
            .await?
            .into_iter()
            .find(|r| r.booking_id.as_deref() == Some(booking_id))
            .ok_or_else(|| not_found("review of booking", booking_id))
    }

    async fn by_car(&self, car_id: &str) -> Result<Vec<Review>, BackendError> {
        let mut reviews: Vec<Review> = ReviewRepository::all(self).await?;
        reviews.retain(|r| r.car_id == car_id);
        Ok(reviews)
    }

    async fn create(&self, review: &NewReview) -> Result<Review, BackendError> {
        let mut state = self.state.lock().await;
        let created = Review {
            id: state.id("review"),
            user_id: review.user_id.clone(),
            car_id: review.car_id.clone(),
            booking_id: review.booking_id.clone(),
            rating: review.rating,
            comment: review.comment.clone(),
            created_at: Utc::now(),
            profiles: None,
            cars: None,
            bookings: None,
        };
        state.reviews.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &ReviewPatch) -> Result<Review, BackendError> {
        let mut state = self.state.lock().await;
        let review: &mut Review = state
            .reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found("review", id))?;
        patch.apply(review);
        Ok(review.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.state.lock().await.reviews.retain(|r| r.id != id);
        Ok(())
    }
}

#[async_trait]
impl AuthGateway for MemoryBackend {
    async fn sign_up(&self, request: &SignUp) -> Result<SignUpOutcome, BackendError> {
        let mut state = self.state.lock().await;
        if state.users.contains_key(&request.email) {
            return Err(BackendError::Auth("User already registered".to_string()));
        }
        let user = AuthUser {
            id: state.id("user"),
            email: Some(request.email.clone()),
        };
        state.users.insert(
            request.email.clone(),
            (request.password.clone(), user.clone()),
        );

        let session: Option<Session> = if state.confirm_email {
            None
        } else {
            Some(state.issue(&user))
        };
        Ok(SignUpOutcome { user, session })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let mut state = self.state.lock().await;
        let user: AuthUser = match state.users.get(email) {
            Some((stored, user)) if stored == password => user.clone(),
            _ => return Err(BackendError::Auth("Invalid login credentials".to_string())),
        };
        Ok(state.issue(&user))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, BackendError> {
        let mut state = self.state.lock().await;
        let user: AuthUser = state
            .sessions
            .values()
            .find(|s| s.refresh_token == refresh_token)
            .map(|s| s.user.clone())
            .ok_or_else(|| BackendError::Auth("Invalid Refresh Token".to_string()))?;
        state.sessions.retain(|_, s| s.refresh_token != refresh_token);
        Ok(state.issue(&user))
    }

    async fn sign_out(&self, session: &Session) -> Result<(), BackendError> {
        let mut state = self.state.lock().await;
        state.sign_outs += 1;
        state
            .sessions
            .remove(&session.access_token)
            .map(|_| ())
            .ok_or_else(|| BackendError::Auth("session not found".to_string()))
    }

    async fn user(&self, access_token: &str) -> Result<AuthUser, BackendError> {
        let state = self.state.lock().await;
        state
            .sessions
            .get(access_token)
            .map(|s| s.user.clone())
            .ok_or_else(|| BackendError::Auth("invalid JWT".to_string()))
    }

    fn adopt(&self, session: Option<&Session>) {
        if let Ok(mut adopted) = self.adopted.lock() {
            *adopted = session.map(|s| s.access_token.clone());
        }
    }
}

/// Session store kept in memory.
#[derive(Default)]
pub struct MemorySessionStore {
    session: StdMutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn stored(&self) -> Option<Session> {
        self.session.lock().ok().and_then(|s| s.clone())
    }

    pub fn put(&self, session: Session) {
        if let Ok(mut slot) = self.session.lock() {
            *slot = Some(session);
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, BackendError> {
        Ok(self.stored())
    }

    fn save(&self, session: &Session) -> Result<(), BackendError> {
        self.put(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), BackendError> {
        if let Ok(mut slot) = self.session.lock() {
            *slot = None;
        }
        Ok(())
    }
}
