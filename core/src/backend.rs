//! # HTTP adapter
//!
//! [`RestBackend`] talks to a hosted backend-as-a-service: table access through
//! its PostgREST endpoint and sign-in through its auth endpoint. Like the
//! vendor SDK it replaces, the client is stateful: once a session is adopted
//! every request runs with that user's bearer token, so row-level security on
//! the server decides what the caller may see.
//!
//! Repository impls are split per table under this module.

mod auth;
mod bookings;
mod cars;
mod client;
mod profiles;
mod reviews;

pub use client::RestBackend;

pub(crate) const CARS: &str = "cars";
pub(crate) const BOOKINGS: &str = "bookings";
pub(crate) const PROFILES: &str = "profiles";
pub(crate) const REVIEWS: &str = "reviews";
