mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

/// Environment variable holding the model provider credential.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = if tokio::fs::try_exists(&config_path).await? {
        debug!("Loading configuration from: {}", config_path);
        let config_str = tokio::fs::read_to_string(&config_path).await?;
        serde_yaml::from_str(&config_str)?
    } else {
        debug!("No configuration file at {}, using defaults", config_path);
        Config::default()
    };

    config.apply_env_overrides(|key| env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

impl Config {
    /// Overlays values taken from `lookup` (normally the process environment).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup(API_KEY_VAR) {
            self.llm.api_key = api_key;
        }
        if let Some(path) = lookup("FEEDBACK_PATH") {
            self.feedback.path = path;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.llm.api_key.trim().is_empty() {
            return Err(Error::config(format!(
                "{} is not set; the model API key is required",
                API_KEY_VAR
            )));
        }
        if self.llm.model.is_empty() {
            return Err(Error::config("llm.model must not be empty"));
        }
        if self.server.preview_max_side == 0 {
            return Err(Error::config("server.preview_max_side must be at least 1"));
        }
        if self.feedback.path.is_empty() {
            return Err(Error::config("feedback.path must not be empty"));
        }
        Ok(())
    }
}
