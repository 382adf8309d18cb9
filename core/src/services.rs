//! # Application Services
//!
//! One service per console area. Each holds the ports it needs and takes the
//! caller's [`Identity`](fleetdash_common::models::Identity) wherever access
//! depends on who is asking.

use std::sync::Arc;

use fleetdash_common::ports::{
    AuthGateway, BookingRepository, CarRepository, ProfileRepository, ReviewRepository,
};

use crate::backend::RestBackend;

pub mod auth;
pub mod bookings;
pub mod customers;
pub mod dashboard;
pub mod reports;
pub mod reviews;
pub mod vehicles;

pub use auth::{AuthService, Registration, SignupProfile};
pub use bookings::{BookingRequest, BookingService};
pub use customers::CustomerService;
pub use dashboard::DashboardService;
pub use reports::ReportService;
pub use reviews::{ReviewRequest, ReviewService};
pub use vehicles::VehicleService;

/// Port handles shared by every service.
#[derive(Clone)]
pub struct Repositories {
    pub cars: Arc<dyn CarRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub auth: Arc<dyn AuthGateway>,
}

impl Repositories {
    /// Every port served by the same HTTP client.
    pub fn from_backend(backend: Arc<RestBackend>) -> Self {
        Self {
            cars: backend.clone(),
            bookings: backend.clone(),
            profiles: backend.clone(),
            reviews: backend.clone(),
            auth: backend,
        }
    }
}
