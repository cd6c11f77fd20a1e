use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mealcal_shared::{Error, Result};
use mealcal_user::{
    AccessToken, AuthApi, GoalsInput, MemoryTokenStore, ProfileUpdate, RegisterInput,
    SessionManager, UserProfile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Outcome {
    Ok,
    Unauthorized,
    Rejected,
    Unreachable,
}

impl Outcome {
    fn into_result<T>(self, value: T) -> Result<T> {
        match self {
            Outcome::Ok => Ok(value),
            Outcome::Unauthorized => Err(Error::AuthExpired("Could not validate credentials".to_owned())),
            Outcome::Rejected => Err(Error::Validation("Rejected by server".to_owned())),
            Outcome::Unreachable => Err(Error::Transport("connection refused".to_owned())),
        }
    }
}

/// Scripted server. Every call is recorded by method name.
pub struct FakeApi {
    pub calls: Mutex<Vec<&'static str>>,
    pub token: Mutex<Outcome>,
    pub me: Mutex<Outcome>,
    pub update: Mutex<Outcome>,
    pub password: Mutex<Outcome>,
    pub email: Mutex<String>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(vec![]),
            token: Mutex::new(Outcome::Ok),
            me: Mutex::new(Outcome::Ok),
            update: Mutex::new(Outcome::Ok),
            password: Mutex::new(Outcome::Ok),
            email: Mutex::new("jane@example.com".to_owned()),
        }
    }
}

#[allow(dead_code)]
impl FakeApi {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|call| **call == name).count()
    }

    pub fn set_token(&self, outcome: Outcome) {
        *self.token.lock().unwrap() = outcome;
    }

    pub fn set_me(&self, outcome: Outcome) {
        *self.me.lock().unwrap() = outcome;
    }

    pub fn set_update(&self, outcome: Outcome) {
        *self.update.lock().unwrap() = outcome;
    }

    pub fn set_password(&self, outcome: Outcome) {
        *self.password.lock().unwrap() = outcome;
    }

    pub fn set_email(&self, email: &str) {
        *self.email.lock().unwrap() = email.to_owned();
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    fn update_outcome(&self, name: &'static str) -> Result<()> {
        self.record(name);
        self.update.lock().unwrap().into_result(())
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn register(&self, _input: &RegisterInput) -> Result<()> {
        self.update_outcome("register")
    }

    async fn token(&self, _email: &str, _password: &str) -> Result<AccessToken> {
        self.record("token");
        self.token.lock().unwrap().into_result(AccessToken {
            access_token: "fresh-token".to_owned(),
            token_type: "bearer".to_owned(),
        })
    }

    async fn change_password(&self, _old: &str, _new: &str) -> Result<()> {
        self.record("change_password");
        self.password.lock().unwrap().into_result(())
    }

    async fn me(&self) -> Result<UserProfile> {
        self.record("me");
        let user = UserProfile {
            email: self.email.lock().unwrap().clone(),
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            ..Default::default()
        };
        self.me.lock().unwrap().into_result(user)
    }

    async fn update_profile(&self, _update: &ProfileUpdate) -> Result<()> {
        self.update_outcome("update_profile")
    }

    async fn update_dietary_restrictions(&self, _values: &[String]) -> Result<()> {
        self.update_outcome("update_dietary_restrictions")
    }

    async fn update_allergies(&self, _values: &[String]) -> Result<()> {
        self.update_outcome("update_allergies")
    }

    async fn update_disliked_ingredients(&self, _values: &[String]) -> Result<()> {
        self.update_outcome("update_disliked_ingredients")
    }

    async fn update_preferred_cuisines(&self, _values: &[String]) -> Result<()> {
        self.update_outcome("update_preferred_cuisines")
    }

    async fn update_goals(&self, _goals: &GoalsInput) -> Result<()> {
        self.update_outcome("update_goals")
    }
}

pub struct TestSession {
    pub manager: SessionManager<Arc<FakeApi>>,
    pub api: Arc<FakeApi>,
    pub store: Arc<MemoryTokenStore>,
}

pub fn setup(token: Option<&str>) -> TestSession {
    let api = Arc::new(FakeApi::default());
    let store = Arc::new(match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::default(),
    });
    let manager = SessionManager::new(api.clone(), store.clone());

    TestSession {
        manager,
        api,
        store,
    }
}

#[allow(dead_code)]
pub async fn signed_in() -> anyhow::Result<TestSession> {
    let state = setup(None);
    state.manager.login("jane@example.com", "secret-password").await?;
    state.api.calls.lock().unwrap().clear();

    Ok(state)
}
