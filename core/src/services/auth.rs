//! Sign-in, sign-up and the persisted session.
//!
//! After any call that yields a session, the gateway adopts it so data
//! requests run as that user.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use fleetdash_common::BackendError;
use fleetdash_common::models::{AuthUser, Identity, NewProfile, Profile, ProfilePatch, Session};
use fleetdash_common::ports::{AuthGateway, ProfileRepository, SessionStore, SignUp, SignUpOutcome};
use serde_json::json;
use tracing::{error, info, warn};

use super::Repositories;
use crate::error::{ServiceError, ServiceResult};

/// Profile columns collected at sign-up.
#[derive(Debug, Clone, Default)]
pub struct SignupProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Result of a sign-up. Projects that confirm e-mail addresses return no
/// session, so the new user still has to log in.
#[derive(Debug, Clone)]
pub struct Registration {
    pub identity: Identity,
    pub signed_in: bool,
}

pub struct AuthService {
    auth: Arc<dyn AuthGateway>,
    profiles: Arc<dyn ProfileRepository>,
    store: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(repos: &Repositories, store: Arc<dyn SessionStore>) -> Self {
        Self {
            auth: repos.auth.clone(),
            profiles: repos.profiles.clone(),
            store,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<Identity> {
        let email: &str = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ServiceError::invalid("email and password are required"));
        }

        let session: Session = self
            .auth
            .sign_in(email, password)
            .await
            .inspect_err(|e| error!(email, %e, "sign in failed"))?;

        self.store.save(&session)?;
        self.auth.adopt(Some(&session));
        info!(user = %session.user.id, "signed in");

        Ok(self.identity(session.user).await)
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        profile: SignupProfile,
    ) -> ServiceResult<Registration> {
        let email: &str = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ServiceError::invalid("email and password are required"));
        }

        let request = SignUp {
            email: email.to_string(),
            password: password.to_string(),
            metadata: json!({}),
        };
        let outcome: SignUpOutcome = self
            .auth
            .sign_up(&request)
            .await
            .inspect_err(|e| error!(email, %e, "sign up failed"))?;

        let signed_in: bool = outcome.session.is_some();
        if let Some(session) = &outcome.session {
            self.store.save(session)?;
            self.auth.adopt(Some(session));
        }

        let row: NewProfile = NewProfile::customer(
            outcome.user.id.clone(),
            profile.first_name,
            profile.last_name,
            profile.phone_number,
            Utc::now(),
        );
        let created: Option<Profile> = match self.profiles.create(&row).await {
            Ok(created) => Some(created),
            Err(e) => {
                warn!(user = %outcome.user.id, %e, "account created but profile row was not");
                None
            }
        };

        info!(user = %outcome.user.id, signed_in, "account created");
        Ok(Registration {
            identity: Identity::new(outcome.user, created),
            signed_in,
        })
    }

    /// Signs out remotely when possible. The local session is dropped either way.
    pub async fn logout(&self) -> ServiceResult<()> {
        match self.store.load() {
            Ok(Some(session)) => {
                if let Err(e) = self.auth.sign_out(&session).await {
                    warn!(%e, "remote sign out failed");
                }
            }
            Ok(None) => {}
            Err(e) => warn!(%e, "stored session unreadable"),
        }

        self.auth.adopt(None);
        self.store.clear()?;
        info!("signed out");
        Ok(())
    }

    pub async fn current(&self) -> ServiceResult<Option<Identity>> {
        self.current_at(Utc::now()).await
    }

    /// Restores the stored session, refreshing it once if it expired by `now`.
    pub async fn current_at(&self, now: DateTime<Utc>) -> ServiceResult<Option<Identity>> {
        let Some(mut session) = self.store.load()? else {
            return Ok(None);
        };

        if session.is_expired(now) {
            match self.auth.refresh(&session.refresh_token).await {
                Ok(fresh) => {
                    self.store.save(&fresh)?;
                    session = fresh;
                }
                Err(e) => {
                    warn!(%e, "session expired and could not be refreshed");
                    self.auth.adopt(None);
                    self.store.clear()?;
                    return Ok(None);
                }
            }
        }

        self.auth.adopt(Some(&session));
        Ok(Some(self.identity(session.user).await))
    }

    /// Like [`Self::current`] but signed-out callers are an error.
    pub async fn require(&self) -> ServiceResult<Identity> {
        self.current().await?.ok_or(ServiceError::NotAuthenticated)
    }

    /// Asks the auth service who the stored token belongs to.
    pub async fn verify(&self) -> ServiceResult<AuthUser> {
        let session: Session = self.store.load()?.ok_or(ServiceError::NotAuthenticated)?;
        let user: AuthUser = self
            .auth
            .user(&session.access_token)
            .await
            .inspect_err(|e| error!(%e, "token verification failed"))?;

        if user.id != session.user.id {
            return Err(BackendError::Auth("token belongs to a different user".to_string()).into());
        }
        Ok(user)
    }

    /// Updates the caller's own profile row.
    pub async fn update_profile(
        &self,
        identity: &Identity,
        patch: ProfilePatch,
    ) -> ServiceResult<Profile> {
        if identity.profile.is_none() {
            return Err(ServiceError::invalid("this account has no profile"));
        }
        if patch.is_empty() {
            return Err(ServiceError::invalid("nothing to update"));
        }
        if patch.is_admin.is_some() && !identity.is_admin() {
            return Err(ServiceError::forbidden("only admins can change admin rights"));
        }

        let profile: Profile = self
            .profiles
            .update(identity.user_id(), &patch.touched(Utc::now()))
            .await
            .inspect_err(|e| error!(user = identity.user_id(), %e, "profile update failed"))?;
        Ok(profile)
    }

    async fn identity(&self, user: AuthUser) -> Identity {
        let profile: Option<Profile> = match self.profiles.by_id(&user.id).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(user = %user.id, %e, "profile unavailable");
                None
            }
        };
        Identity::new(user, profile)
    }
}
