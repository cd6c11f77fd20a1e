use mealcal_shared::Result;

use super::PASSWORD_FALLBACK;
use crate::AuthApi;

impl<A: AuthApi> super::SessionManager<A> {
    #[tracing::instrument(skip_all)]
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        self.require_authenticated()?;

        if old_password.is_empty() {
            mealcal_shared::user!("Current password is required");
        }

        if new_password.chars().count() < 8 {
            mealcal_shared::user!("Password must be at least 8 characters");
        }

        self.call(|api| api.change_password(old_password, new_password))
            .await
            .map_err(|err| err.or_fallback(PASSWORD_FALLBACK))
    }
}
