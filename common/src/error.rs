use thiserror::Error;

/// Failure of a single round-trip to the rental backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to backend failed: {0}")]
    Transport(String),

    #[error("backend returned {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("malformed query: {0}")]
    InvalidQuery(String),

    #[error("could not decode backend response: {0}")]
    Decode(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("no active session, run `fleetdash login` first")]
    NoSession,

    #[error("session storage: {0}")]
    Storage(String),
}

impl BackendError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing backend URL (set --url or FLEETDASH_URL)")]
    MissingUrl,

    #[error("missing anon key (set --anon-key or FLEETDASH_ANON_KEY)")]
    MissingAnonKey,

    #[error("backend URL must start with http:// or https://, got '{0}'")]
    InvalidUrl(String),
}
