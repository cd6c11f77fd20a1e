mod login;
mod password;
mod profile;

use std::{fmt, future::Future, sync::Arc};

use mealcal_shared::{Error, Result};
use tokio::sync::watch;

use crate::{AuthApi, TokenStore, UserProfile};

pub(crate) const LOGIN_FALLBACK: &str = "Login failed. Please try again.";
pub(crate) const REGISTER_FALLBACK: &str = "Registration failed. Please try again.";
pub(crate) const PASSWORD_FALLBACK: &str = "Failed to change password. Please try again.";
pub(crate) const PROFILE_FALLBACK: &str = "Failed to update profile. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
pub enum Phase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Snapshot of the client session. Only [`SessionManager`] builds these.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    phase: Phase,
    identity: Option<UserProfile>,
    token: Option<String>,
}

impl Session {
    fn authenticating(token: Option<String>) -> Self {
        Self {
            phase: Phase::Authenticating,
            identity: None,
            token,
        }
    }

    fn authenticated(token: String, identity: UserProfile) -> Self {
        Self {
            phase: Phase::Authenticated,
            identity: Some(identity),
            token: Some(token),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn identity(&self) -> Option<&UserProfile> {
        self.identity.as_ref()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("identity", &self.identity.as_ref().map(|user| &user.email))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Owns the session state machine and the persisted token.
///
/// Every transition replaces the whole [`Session`] in one send, so
/// subscribers never see a half-applied change.
pub struct SessionManager<A> {
    api: A,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<Session>,
}

impl<A: AuthApi> SessionManager<A> {
    pub fn new(api: A, store: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            store,
            state: watch::Sender::new(Session::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    pub fn identity(&self) -> Option<UserProfile> {
        self.state.borrow().identity.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == Phase::Authenticated
    }

    /// Runs an API call on behalf of the session. A 401 from the server
    /// signs the user out before the error is handed back.
    pub async fn call<'a, T, F, Fut>(&'a self, f: F) -> Result<T>
    where
        F: FnOnce(&'a A) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match f(&self.api).await {
            Err(err) if err.is_auth_expired() => {
                tracing::warn!("server rejected the session token, signing out");
                self.logout();
                Err(err)
            }
            res => res,
        }
    }

    /// Restores a persisted session. No request is sent without a token.
    #[tracing::instrument(skip_all)]
    pub async fn bootstrap(&self) -> Phase {
        let token = match self.store.get() {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(err = %err, "failed to read the persisted token");
                None
            }
        };

        let Some(token) = token else {
            self.state.send_replace(Session::default());
            return Phase::Anonymous;
        };

        if let Err(err) = self.establish(token).await {
            tracing::info!(err = %err, "persisted session is no longer valid");
        }

        self.phase()
    }

    /// Clears the token and identity. Does nothing when already signed out.
    pub fn logout(&self) {
        if let Err(err) = self.store.clear() {
            tracing::error!(err = %err, "failed to clear the persisted token");
        }

        let changed = self.state.send_if_modified(|session| {
            if *session == Session::default() {
                return false;
            }

            *session = Session::default();
            true
        });

        if changed {
            tracing::info!("signed out");
        }
    }

    /// Fetches the profile for `token`. Any failure means the token is
    /// unusable: it is dropped and the session ends anonymous.
    async fn establish(&self, token: String) -> Result<()> {
        self.state
            .send_replace(Session::authenticating(Some(token.clone())));

        match self.api.me().await {
            Ok(identity) => {
                tracing::info!(email = identity.email.as_str(), "signed in");
                self.state
                    .send_replace(Session::authenticated(token, identity));
                Ok(())
            }
            Err(err) => {
                self.logout();
                Err(err)
            }
        }
    }

    fn require_authenticated(&self) -> Result<()> {
        if self.is_authenticated() {
            return Ok(());
        }

        Err(Error::AuthExpired("Please sign in to continue.".to_owned()))
    }
}
