pub mod api;
pub mod config;
pub mod observability;
pub mod planner;
pub mod storage;

use std::sync::Arc;

use mealcal_user::{SessionManager, TokenStore};

pub use api::HttpApi;
pub use planner::Planner;
pub use storage::FileTokenStore;

/// Wires the HTTP transport and the session around the configured token
/// file. The session is not bootstrapped yet.
pub fn connect(config: &config::Config) -> mealcal_shared::Result<Arc<SessionManager<HttpApi>>> {
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.storage.token_path));
    let api = HttpApi::new(&config.api, store.clone())?;

    Ok(Arc::new(SessionManager::new(api, store)))
}
