use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Placeholder substituted with the language code in `wikipedia.api_url`
pub const LANGUAGE_PLACEHOLDER: &str = "{lang}";

const CONFIG_FILE_NAME: &str = "wikistats.toml";

fn default_api_url() -> String {
    "https://{lang}.wikipedia.org/w/api.php".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("wikistats/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikipediaConfig {
    /// Endpoint template, `{lang}` is replaced by the language code
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Some("warn".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file (if any) with environment variable overrides
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_file = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::InvalidValue(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        let mut config = match config_file {
            Some(path) => {
                tracing::debug!("Loading config from: {}", path.display());
                let content = std::fs::read_to_string(&path)?;
                toml::from_str::<Config>(&content)?
            }
            None => {
                tracing::debug!("No config file found, using defaults and environment variables");
                Config::default()
            }
        };

        // Apply environment variable overrides
        config.apply_env_overrides()?;

        // Apply defaults for optional sections
        if config.logging.is_none() {
            config.logging = Some(LoggingConfig::default());
        }

        // Validate endpoint template and request settings
        config.validate()?;

        Ok(config)
    }

    /// Look for `wikistats.toml` in the current directory, then in the user config directory
    fn find_config_file() -> Option<PathBuf> {
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Some(current_dir_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("wikistats").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply `WIKISTATS_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_url) = lookup("WIKISTATS_API_URL") {
            self.wikipedia.api_url = api_url;
        }
        if let Some(timeout) = lookup("WIKISTATS_TIMEOUT_SECS") {
            self.wikipedia.timeout_secs = timeout.parse().map_err(|_| {
                ConfigError::InvalidValue(
                    "WIKISTATS_TIMEOUT_SECS must be a valid number".to_string(),
                )
            })?;
        }
        if let Some(user_agent) = lookup("WIKISTATS_USER_AGENT") {
            self.wikipedia.user_agent = user_agent;
        }
        if let Some(level) = lookup("WIKISTATS_LOG_LEVEL") {
            let logging = self.logging.get_or_insert_with(LoggingConfig::default);
            logging.level = Some(level);
        }

        Ok(())
    }

    /// Validate that the endpoint template and request settings are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wikipedia.api_url.is_empty() {
            return Err(ConfigError::MissingRequired(
                "wikipedia.api_url or WIKISTATS_API_URL".to_string(),
            ));
        }

        if !self.wikipedia.api_url.contains(LANGUAGE_PLACEHOLDER) {
            return Err(ConfigError::InvalidValue(format!(
                "wikipedia.api_url must contain the {LANGUAGE_PLACEHOLDER} placeholder"
            )));
        }

        if self.wikipedia.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "wikipedia.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.wikipedia.user_agent.trim().is_empty() {
            return Err(ConfigError::MissingRequired(
                "wikipedia.user_agent or WIKISTATS_USER_AGENT".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the logging configuration with defaults
    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }
}
