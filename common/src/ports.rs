//! # Outbound Ports
//!
//! Contracts between the application services and the rental backend.
//!
//! ## Rules
//! 1. Everything here is a trait; implementations live in `fleetdash-core::backend`
//!    (HTTP) and in the integration-test crate (in-memory).
//! 2. Signatures speak in [`crate::models`] types and [`crate::BackendError`].
//! 3. One method per backend query. No business rules: availability syncing,
//!    access checks and aggregation belong to the services.

pub mod auth;
pub mod bookings;
pub mod cars;
pub mod profiles;
pub mod reviews;
pub mod session;

pub use auth::{AuthGateway, SignUp, SignUpOutcome};
pub use bookings::BookingRepository;
pub use cars::CarRepository;
pub use profiles::ProfileRepository;
pub use reviews::ReviewRepository;
pub use session::SessionStore;
