//! # fleetdash core
//!
//! * **[`backend`]**: the HTTP adapter. One [`backend::RestBackend`] implements every
//!   repository port and the auth gateway against a hosted PostgREST + auth project.
//! * **[`session`]**: file-backed [`fleetdash_common::ports::SessionStore`].
//! * **[`services`]**: the use cases (sign-in, fleet, bookings, customers, reviews,
//!   dashboard, reports). They only see ports, never the adapter.

pub mod backend;
pub mod error;
pub mod services;
pub mod session;

pub use error::{ServiceError, ServiceResult};
