//! # fleetdash common
//!
//! Shared vocabulary of the workspace:
//!
//! * **[`models`]**: the records of the rental backend (cars, bookings, profiles, reviews)
//!   and the client-side aggregations computed over them.
//! * **[`ports`]**: the traits the application services talk through. Implemented by the
//!   HTTP adapter in `fleetdash-core` and by the in-memory backend in the test crate.
//! * **[`config`]** and **[`error`]**: backend configuration and the errors crossing the ports.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{BackendError, ConfigError};
