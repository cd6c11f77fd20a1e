use std::sync::Arc;

use async_trait::async_trait;
use mealcal_mealplan::{MealPlanApi, MealPlanRecord};
use mealcal_shared::{Error, Result};
use mealcal_user::{
    AccessToken, AuthApi, GoalsInput, PasswordChange, ProfileUpdate, RegisterInput, TokenStore,
    UserProfile,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use url::Url;

use crate::config::ApiConfig;

/// JSON client for the meal planning server.
///
/// The bearer token is read from the store on every request; this type
/// never writes it.
pub struct HttpApi {
    client: Client,
    base_url: Url,
    store: Arc<dyn TokenStore>,
}

impl HttpApi {
    pub fn new(config: &ApiConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|err| anyhow::anyhow!("invalid API base URL '{}': {err}", config.base_url))?;

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("mealcal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| anyhow::anyhow!("failed to build HTTP client: {err}"))?;

        Ok(Self {
            client,
            base_url,
            store,
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| anyhow::anyhow!("invalid endpoint '{path}': {err}"))?;

        let mut req = self.client.request(method, url);

        if let Some(token) = self.store.get()? {
            req = req.bearer_auth(token);
        }

        Ok(req)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let resp = req.send().await.map_err(transport)?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let detail = error_detail(resp).await;
        tracing::debug!(status = status.as_u16(), detail = %detail, "request rejected");

        Err(match status {
            StatusCode::UNAUTHORIZED => Error::AuthExpired(detail),
            status if status.is_client_error() => Error::Validation(detail),
            status => Error::Server(format!("{status}: {detail}")),
        })
    }

    async fn send_empty(&self, req: RequestBuilder) -> Result<()> {
        self.send(req).await?;

        Ok(())
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        self.send(req).await?.json::<T>().await.map_err(transport)
    }
}

fn transport(err: reqwest::Error) -> Error {
    Error::Transport(err.to_string())
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Reads the server's `detail` field, which is either a message or a list
/// of field errors each carrying a `msg`.
async fn error_detail(resp: Response) -> String {
    let status = resp.status();
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_owned()
    };

    let Ok(body) = resp.text().await else {
        return fallback();
    };

    let Ok(ErrorBody { detail }) = serde_json::from_str::<ErrorBody>(&body) else {
        return fallback();
    };

    match detail {
        serde_json::Value::String(msg) => msg,
        serde_json::Value::Array(items) => {
            let messages = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
                .collect::<Vec<_>>();

            if messages.is_empty() {
                fallback()
            } else {
                messages.join("; ")
            }
        }
        _ => fallback(),
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn register(&self, input: &RegisterInput) -> Result<()> {
        let req = self.request(Method::POST, "register")?.json(input);
        self.send_empty(req).await
    }

    async fn token(&self, email: &str, password: &str) -> Result<AccessToken> {
        let req = self
            .request(Method::POST, "token")?
            .form(&[("username", email), ("password", password)]);
        self.send_json(req).await
    }

    async fn change_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        let req = self
            .request(Method::POST, "change-password")?
            .json(&PasswordChange {
                old_password: old_password.to_owned(),
                new_password: new_password.to_owned(),
            });
        self.send_empty(req).await
    }

    async fn me(&self) -> Result<UserProfile> {
        let req = self.request(Method::GET, "users/me")?;
        self.send_json(req).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        let req = self.request(Method::PUT, "users/profile")?.json(update);
        self.send_empty(req).await
    }

    async fn update_dietary_restrictions(&self, values: &[String]) -> Result<()> {
        let req = self
            .request(Method::PUT, "users/profile/dietary-restrictions")?
            .json(values);
        self.send_empty(req).await
    }

    async fn update_allergies(&self, values: &[String]) -> Result<()> {
        let req = self
            .request(Method::PUT, "users/profile/allergies")?
            .json(values);
        self.send_empty(req).await
    }

    async fn update_disliked_ingredients(&self, values: &[String]) -> Result<()> {
        let req = self
            .request(Method::PUT, "users/profile/disliked-ingredients")?
            .json(values);
        self.send_empty(req).await
    }

    async fn update_preferred_cuisines(&self, values: &[String]) -> Result<()> {
        let req = self
            .request(Method::PUT, "users/profile/preferred-cuisines")?
            .json(values);
        self.send_empty(req).await
    }

    async fn update_goals(&self, goals: &GoalsInput) -> Result<()> {
        let req = self
            .request(Method::PUT, "users/profile/goals")?
            .json(goals);
        self.send_empty(req).await
    }
}

#[async_trait]
impl MealPlanApi for HttpApi {
    async fn generate_meal_plan(&self, days: usize) -> Result<()> {
        let req = self
            .request(Method::POST, "meal-plans/generate")?
            .json(&json!({ "days": days }));
        self.send_empty(req).await
    }

    async fn list_meal_plans(&self) -> Result<Vec<MealPlanRecord>> {
        let req = self.request(Method::GET, "meal-plans/")?;
        self.send_json(req).await
    }

    async fn complete_day(&self, date: &str) -> Result<()> {
        let req = self
            .request(Method::POST, "meal-plans/complete")?
            .json(&json!({ "date": date }));
        self.send_empty(req).await
    }

    async fn generate_ahead(&self) -> Result<()> {
        let req = self.request(Method::POST, "meal-plans/generate-ahead")?;
        self.send_empty(req).await
    }
}
