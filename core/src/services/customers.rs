use std::sync::Arc;

use chrono::Utc;
use fleetdash_common::models::{Booking, Identity, Profile, ProfilePatch};
use fleetdash_common::ports::{BookingRepository, ProfileRepository};
use tracing::{error, info};

use super::Repositories;
use crate::error::{ServiceError, ServiceResult, require_id};

/// Customer records. Admins manage everyone, customers only themselves.
pub struct CustomerService {
    profiles: Arc<dyn ProfileRepository>,
    bookings: Arc<dyn BookingRepository>,
}

fn require_admin(identity: &Identity, action: &str) -> ServiceResult<()> {
    if identity.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::forbidden(format!("only admins can {action}")))
    }
}

fn require_self_or_admin(identity: &Identity, customer_id: &str) -> ServiceResult<()> {
    if identity.is_admin() || identity.owns(customer_id) {
        Ok(())
    } else {
        Err(ServiceError::forbidden("you can only access your own customer record"))
    }
}

impl CustomerService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            profiles: repos.profiles.clone(),
            bookings: repos.bookings.clone(),
        }
    }

    pub async fn list(&self, identity: &Identity) -> ServiceResult<Vec<Profile>> {
        require_admin(identity, "list customers")?;
        let profiles: Vec<Profile> = self
            .profiles
            .all()
            .await
            .inspect_err(|e| error!(%e, "failed to fetch customers"))?;
        Ok(profiles)
    }

    pub async fn get(&self, identity: &Identity, id: &str) -> ServiceResult<Profile> {
        let id: &str = require_id("customer", id)?;
        require_self_or_admin(identity, id)?;
        let profile: Profile = self
            .profiles
            .by_id(id)
            .await
            .inspect_err(|e| error!(id, %e, "failed to fetch customer"))?;
        Ok(profile)
    }

    /// Booking history shown next to a customer record.
    pub async fn bookings_for(&self, identity: &Identity, id: &str) -> ServiceResult<Vec<Booking>> {
        let id: &str = require_id("customer", id)?;
        require_self_or_admin(identity, id)?;
        let bookings: Vec<Booking> = self
            .bookings
            .by_user(id)
            .await
            .inspect_err(|e| error!(id, %e, "failed to fetch customer bookings"))?;
        Ok(bookings)
    }

    pub async fn update(
        &self,
        identity: &Identity,
        id: &str,
        patch: ProfilePatch,
    ) -> ServiceResult<Profile> {
        let id: &str = require_id("customer", id)?;
        require_self_or_admin(identity, id)?;
        if patch.is_empty() {
            return Err(ServiceError::invalid("nothing to update"));
        }
        if patch.is_admin.is_some() {
            require_admin(identity, "change admin rights")?;
        }

        let profile: Profile = self
            .profiles
            .update(id, &patch.touched(Utc::now()))
            .await
            .inspect_err(|e| error!(id, %e, "failed to update customer"))?;
        Ok(profile)
    }

    pub async fn delete(&self, identity: &Identity, id: &str) -> ServiceResult<()> {
        require_admin(identity, "delete customers")?;
        let id: &str = require_id("customer", id)?;
        self.profiles
            .delete(id)
            .await
            .inspect_err(|e| error!(id, %e, "failed to delete customer"))?;
        info!(id, "customer removed");
        Ok(())
    }
}
