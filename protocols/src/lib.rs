//! Wire formats of the rental backend: the PostgREST query string and the
//! payloads of the authentication service.

pub mod auth;
pub mod postgrest;

pub use postgrest::{Direction, ErrorPayload, Operator, Query, QueryError, Select};
