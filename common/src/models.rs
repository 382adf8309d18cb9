//! # Domain Models
//!
//! Records of the rental backend and the arithmetic the console performs over them.
//!
//! ## Core Entities
//! * [`car::Car`]: a rentable vehicle.
//! * [`booking::Booking`]: a reservation of a car by a customer over a date range.
//! * [`profile::Profile`]: the customer record behind an authentication identity.
//! * [`review::Review`]: a customer's rating of a car, optionally tied to a booking.
//!
//! ## Derived Values
//! * [`stats::DashboardStats`]: fleet and revenue counters shown on the dashboard.
//! * [`report::RevenueReport`]: revenue over a window, grouped by car and status.
//! * [`pricing`]: rental day counting and price quotes.
//!
//! The schema is owned by the backend; these types only mirror it. Patch types
//! skip `None` fields when serialized so untouched columns are left alone.

pub mod booking;
pub mod car;
pub mod pricing;
pub mod profile;
pub mod report;
pub mod review;
pub mod session;
pub mod stats;

pub use booking::{Booking, BookingPatch, BookingStatus, CarSummary, CustomerSummary, NewBooking};
pub use car::{Car, CarPatch, NewCar};
pub use profile::{NewProfile, Profile, ProfilePatch};
pub use review::{BookingPeriod, NewReview, Review, ReviewPatch};
pub use session::{AuthUser, Identity, Session};
pub use stats::DashboardStats;
