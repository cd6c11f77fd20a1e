use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
        }
    }
}

fn default_token_path() -> PathBuf {
    PathBuf::from(".mealcal/session.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALCAL__API__BASE_URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("api.base_url", default_base_url())?
            .set_default("api.timeout_secs", 30)?
            .set_default("storage.token_path", ".mealcal/session.json")?
            .set_default("observability.log_level", default_log_level())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALCAL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        // Legacy variable without prefix
        if let Ok(base_url) = env::var("MEALCAL_API_URL") {
            builder = builder.set_override("api.base_url", base_url)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Err(err) = url::Url::parse(&self.api.base_url) {
            return Err(format!("Invalid API base URL '{}': {err}", self.api.base_url));
        }
        if self.api.timeout_secs == 0 {
            return Err("API timeout must be greater than 0".to_string());
        }
        if self.storage.token_path.as_os_str().is_empty() {
            return Err("Token path must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.observability.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_bad_url() {
        let config = Config {
            api: ApiConfig {
                base_url: "not a url".to_string(),
                timeout_secs: 30,
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = Config {
            api: ApiConfig {
                base_url: default_base_url(),
                timeout_secs: 0,
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_token_path() {
        let config = Config {
            storage: StorageConfig {
                token_path: PathBuf::new(),
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.child("mealcal.toml");
        std::fs::write(
            &path,
            "[api]\ntimeout_secs = 5\n\n[storage]\ntoken_path = \"/tmp/mealcal-token.json\"\n",
        )?;

        let config = Config::load(Some(path.to_string_lossy().into_owned()))?;

        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(
            config.storage.token_path,
            PathBuf::from("/tmp/mealcal-token.json")
        );
        assert_eq!(config.observability.log_level, "info");

        Ok(())
    }
}
