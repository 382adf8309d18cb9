use async_trait::async_trait;
use serde_json::Value;

use crate::error::BackendError;
use crate::models::{AuthUser, Session};

/// Registration request. `metadata` is stored on the auth identity itself.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub metadata: Value,
}

/// Projects with e-mail confirmation enabled return the user without a session.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user: AuthUser,
    pub session: Option<Session>,
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_up(&self, request: &SignUp) -> Result<SignUpOutcome, BackendError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    async fn refresh(&self, refresh_token: &str) -> Result<Session, BackendError>;

    async fn sign_out(&self, session: &Session) -> Result<(), BackendError>;

    /// The user behind an access token.
    async fn user(&self, access_token: &str) -> Result<AuthUser, BackendError>;

    /// Makes subsequent data requests run as `session`, or anonymously with `None`.
    fn adopt(&self, session: Option<&Session>);
}
