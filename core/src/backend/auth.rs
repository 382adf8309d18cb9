use async_trait::async_trait;
use chrono::Utc;
use fleetdash_common::BackendError;
use fleetdash_common::models::{AuthUser, Session};
use fleetdash_common::ports::{AuthGateway, SignUp, SignUpOutcome};
use fleetdash_protocols::auth::{
    AuthErrorPayload, GrantType, LOGOUT_PATH, PasswordCredentials, RefreshRequest, SIGNUP_PATH,
    SignUpRequest, SignUpResponse, TOKEN_PATH, TokenResponse, USER_PATH, UserPayload,
};
use reqwest::{Method, RequestBuilder, Response};
use tracing::debug;

use super::client::{RestBackend, decode};

fn auth_user(payload: UserPayload) -> AuthUser {
    AuthUser {
        id: payload.id,
        email: payload.email,
    }
}

fn into_session(token: TokenResponse) -> Session {
    let expires_at: i64 = token.expiry(Utc::now().timestamp());
    Session {
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        expires_at,
        user: auth_user(token.user),
    }
}

/// Auth endpoints report errors in their own body shape.
async fn checked(builder: RequestBuilder) -> Result<Response, BackendError> {
    let response: Response = builder
        .send()
        .await
        .map_err(|e| BackendError::Transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: String = response.text().await.unwrap_or_default();
    let payload: AuthErrorPayload = serde_json::from_str(&body).unwrap_or_default();
    let message: String = payload
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("auth request failed with status {}", status.as_u16()));

    Err(BackendError::Auth(message))
}

#[async_trait]
impl AuthGateway for RestBackend {
    async fn sign_up(&self, request: &SignUp) -> Result<SignUpOutcome, BackendError> {
        debug!(email = %request.email, "sign up");
        let body = SignUpRequest {
            email: &request.email,
            password: &request.password,
            data: &request.metadata,
        };
        let response: Response =
            checked(self.request(Method::POST, SIGNUP_PATH).json(&body)).await?;

        let outcome: SignUpOutcome = match decode::<SignUpResponse>(response).await? {
            SignUpResponse::Session(token) => {
                let session: Session = into_session(token);
                SignUpOutcome {
                    user: session.user.clone(),
                    session: Some(session),
                }
            }
            SignUpResponse::User(user) => SignUpOutcome {
                user: auth_user(user),
                session: None,
            },
        };
        Ok(outcome)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        debug!(email, "password sign in");
        let builder: RequestBuilder = self
            .request(Method::POST, TOKEN_PATH)
            .query(&GrantType::Password.query())
            .json(&PasswordCredentials { email, password });
        let token: TokenResponse = decode(checked(builder).await?).await?;
        Ok(into_session(token))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, BackendError> {
        debug!("refresh session");
        let builder: RequestBuilder = self
            .request(Method::POST, TOKEN_PATH)
            .query(&GrantType::RefreshToken.query())
            .json(&RefreshRequest { refresh_token });
        let token: TokenResponse = decode(checked(builder).await?).await?;
        Ok(into_session(token))
    }

    async fn sign_out(&self, session: &Session) -> Result<(), BackendError> {
        debug!(user = %session.user.id, "sign out");
        let builder: RequestBuilder =
            self.request_as(Method::POST, LOGOUT_PATH, &session.access_token);
        checked(builder).await?;
        Ok(())
    }

    async fn user(&self, access_token: &str) -> Result<AuthUser, BackendError> {
        let builder: RequestBuilder = self.request_as(Method::GET, USER_PATH, access_token);
        let payload: UserPayload = decode(checked(builder).await?).await?;
        Ok(auth_user(payload))
    }

    fn adopt(&self, session: Option<&Session>) {
        self.set_access_token(session.map(|s| s.access_token.clone()));
    }
}
