use async_trait::async_trait;
use mealcal_shared::Result;
use serde::{Deserialize, Serialize};

use crate::{GoalsInput, ProfileUpdate, RegisterInput, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Account endpoints of the server. Implementations attach the stored
/// bearer token to every request they send.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, input: &RegisterInput) -> Result<()>;

    /// Exchanges credentials for an access token.
    async fn token(&self, email: &str, password: &str) -> Result<AccessToken>;

    async fn change_password(&self, old_password: &str, new_password: &str) -> Result<()>;

    async fn me(&self) -> Result<UserProfile>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<()>;

    async fn update_dietary_restrictions(&self, values: &[String]) -> Result<()>;

    async fn update_allergies(&self, values: &[String]) -> Result<()>;

    async fn update_disliked_ingredients(&self, values: &[String]) -> Result<()>;

    async fn update_preferred_cuisines(&self, values: &[String]) -> Result<()>;

    async fn update_goals(&self, goals: &GoalsInput) -> Result<()>;
}

#[async_trait]
impl<T: AuthApi + ?Sized> AuthApi for std::sync::Arc<T> {
    async fn register(&self, input: &RegisterInput) -> Result<()> {
        (**self).register(input).await
    }

    async fn token(&self, email: &str, password: &str) -> Result<AccessToken> {
        (**self).token(email, password).await
    }

    async fn change_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        (**self).change_password(old_password, new_password).await
    }

    async fn me(&self) -> Result<UserProfile> {
        (**self).me().await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        (**self).update_profile(update).await
    }

    async fn update_dietary_restrictions(&self, values: &[String]) -> Result<()> {
        (**self).update_dietary_restrictions(values).await
    }

    async fn update_allergies(&self, values: &[String]) -> Result<()> {
        (**self).update_allergies(values).await
    }

    async fn update_disliked_ingredients(&self, values: &[String]) -> Result<()> {
        (**self).update_disliked_ingredients(values).await
    }

    async fn update_preferred_cuisines(&self, values: &[String]) -> Result<()> {
        (**self).update_preferred_cuisines(values).await
    }

    async fn update_goals(&self, goals: &GoalsInput) -> Result<()> {
        (**self).update_goals(goals).await
    }
}
