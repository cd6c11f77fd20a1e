use std::future::Future;

use mealcal_shared::{Error, Result};
use validator::Validate;

use super::{PROFILE_FALLBACK, Phase};
use crate::{AuthApi, GoalsInput, ProfileUpdate, UserProfile, profile::validate_macro_split};

impl<A: AuthApi> super::SessionManager<A> {
    /// Reloads the profile of the current session. Unlike sign-in, a
    /// failure here keeps the session, except for a 401.
    #[tracing::instrument(skip_all)]
    pub async fn refresh_profile(&self) -> Result<UserProfile> {
        self.require_authenticated()?;

        let identity = self.call(|api| api.me()).await?;

        let replaced = self.state.send_if_modified(|session| {
            if session.phase != Phase::Authenticated {
                return false;
            }

            session.identity = Some(identity.clone());
            true
        });

        if !replaced {
            tracing::debug!("session ended while the profile was loading");
        }

        Ok(identity)
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }

        if update.target_daily_calories == Some(0) {
            mealcal_shared::user!("Daily calories must be positive");
        }

        if let Some(split) = &update.target_macros_pct {
            validate_macro_split(split).map_err(|err| Error::Validation(err.to_string()))?;
        }

        self.mutate(|api| api.update_profile(&update)).await
    }

    pub async fn update_dietary_restrictions(&self, values: &[String]) -> Result<()> {
        self.mutate(|api| api.update_dietary_restrictions(values))
            .await
    }

    pub async fn update_allergies(&self, values: &[String]) -> Result<()> {
        self.mutate(|api| api.update_allergies(values)).await
    }

    pub async fn update_disliked_ingredients(&self, values: &[String]) -> Result<()> {
        self.mutate(|api| api.update_disliked_ingredients(values))
            .await
    }

    pub async fn update_preferred_cuisines(&self, values: &[String]) -> Result<()> {
        self.mutate(|api| api.update_preferred_cuisines(values))
            .await
    }

    pub async fn update_goals(&self, goals: GoalsInput) -> Result<()> {
        goals.validate()?;

        self.mutate(|api| api.update_goals(&goals)).await
    }

    /// Sends a profile mutation, then reloads the profile. A failed reload
    /// does not fail the mutation.
    #[tracing::instrument(skip_all)]
    async fn mutate<'a, F, Fut>(&'a self, f: F) -> Result<()>
    where
        F: FnOnce(&'a A) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        self.require_authenticated()?;

        self.call(f)
            .await
            .map_err(|err| err.or_fallback(PROFILE_FALLBACK))?;

        if let Err(err) = self.refresh_profile().await {
            tracing::warn!(err = %err, "profile saved but could not be reloaded");
        }

        Ok(())
    }
}
