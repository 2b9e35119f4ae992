// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{ChatbotError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from the default config file location.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from multiple sources with precedence:
    /// 1. Well-known variables (`GEMINI_API_KEY`, `GEMINI_MODEL`, `API_BASE_URL`)
    /// 2. Prefixed environment variables (`INVCHAT__SECTION__KEY`)
    /// 3. Config file (explicit path, or `~/.invchat/config.toml`)
    /// 4. Defaults (lowest)
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p.to_path_buf()).required(true),
            None => File::with_name(&Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("INVCHAT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("gemini.api_key", std::env::var("GEMINI_API_KEY").ok())?
            .set_override_option("gemini.model", std::env::var("GEMINI_MODEL").ok())?
            .set_override_option("inventory.base_url", std::env::var("API_BASE_URL").ok())?
            .build()
            .map_err(|e| ChatbotError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ChatbotError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".invchat")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
