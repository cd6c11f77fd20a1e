use mealcal_shared::Result;
use validator::Validate;

use super::{LOGIN_FALLBACK, REGISTER_FALLBACK, Session};
use crate::{AuthApi, RegisterInput};

impl<A: AuthApi> super::SessionManager<A> {
    /// Exchanges credentials for a token, persists it and loads the
    /// profile. Any existing session is dropped first.
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let email = email.trim();

        if email.is_empty() || password.is_empty() {
            mealcal_shared::user!("Email and password are required");
        }

        self.logout();
        self.state.send_replace(Session::authenticating(None));

        let token = match self.api.token(email, password).await {
            Ok(token) => token.access_token,
            Err(err) => {
                self.state.send_replace(Session::default());
                return Err(err.or_fallback(LOGIN_FALLBACK));
            }
        };

        if let Err(err) = self.store.set(&token) {
            self.state.send_replace(Session::default());
            return Err(err.or_fallback(LOGIN_FALLBACK));
        }

        self.establish(token)
            .await
            .map_err(|err| err.or_fallback(LOGIN_FALLBACK))
    }

    /// Creates an account. The session itself is left untouched.
    #[tracing::instrument(skip_all)]
    pub async fn register(&self, input: RegisterInput) -> Result<()> {
        input.validate()?;

        self.api
            .register(&input)
            .await
            .map_err(|err| err.or_fallback(REGISTER_FALLBACK))?;

        tracing::info!(email = input.email.as_str(), "account registered");

        Ok(())
    }
}
