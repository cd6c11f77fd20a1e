use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use mealcal_shared::Result;
use mealcal_user::{TOKEN_KEY, TokenStore};
use serde_json::{Map, Value};

/// Token store backed by a small JSON object file. A missing file holds
/// no token.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "unreadable session file, ignoring it");
                Ok(Map::new())
            }
        }
    }

    fn write(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(map)
            .map_err(|err| anyhow::anyhow!("failed to encode session file: {err}"))?;
        fs::write(&self.path, content)?;

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self
            .read()?
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_owned))
    }

    fn set(&self, token: &str) -> Result<()> {
        let mut map = self.read()?;
        map.insert(TOKEN_KEY.to_owned(), Value::String(token.to_owned()));

        self.write(&map)
    }

    fn clear(&self) -> Result<()> {
        let mut map = self.read()?;

        if map.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }

        self.write(&map)
    }
}
