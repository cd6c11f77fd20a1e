use std::sync::Mutex;

use mealcal_shared::{Error, Result};

/// Key the session token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Persistent slot holding at most one bearer token.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Result<Option<String>>;

    fn set(&self, token: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore(Mutex<Option<String>>);

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self(Mutex::new(Some(token.into())))
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.0
            .lock()
            .map_err(|_| Error::Unknown(anyhow::anyhow!("token store lock poisoned")))
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.slot()? = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.slot()?.take();
        Ok(())
    }
}
