//! Configuration and settings management
//!
//! Loads settings from config files and environment variables and defines
//! the campaign constants.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Chat that receives referral and wallet notifications.
pub const DEFAULT_ADMIN_CHAT_ID: i64 = 7_671_281_090;
/// Default location of the persisted referral mapping.
pub const DEFAULT_REFERRALS_FILE: &str = "referrals.json";
/// Default artwork shown with the welcome caption.
pub const DEFAULT_START_IMAGE: &str = "start.jpg";
/// Default artwork shown with the token info caption.
pub const DEFAULT_INFO_IMAGE: &str = "info.jpg";

/// Application settings loaded from environment variables
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Telegram Bot API token
    #[serde(default)]
    pub telegram_token: String,

    /// Chat id of the campaign administrator
    #[serde(default = "default_admin_chat_id")]
    pub admin_chat_id: i64,

    /// Path of the JSON file holding referral records
    #[serde(default = "default_referrals_file")]
    pub referrals_file: String,

    /// Artwork sent with the welcome caption
    #[serde(default = "default_start_image")]
    pub start_image: String,

    /// Artwork sent with the token info caption
    #[serde(default = "default_info_image")]
    pub info_image: String,

    /// Bot entry URL used in referral links.
    /// Falls back to `https://t.me/<bot username>` when unset.
    pub bot_url: Option<String>,
}

const fn default_admin_chat_id() -> i64 {
    DEFAULT_ADMIN_CHAT_ID
}

fn default_referrals_file() -> String {
    DEFAULT_REFERRALS_FILE.to_string()
}

fn default_start_image() -> String {
    DEFAULT_START_IMAGE.to_string()
}

fn default_info_image() -> String {
    DEFAULT_INFO_IMAGE.to_string()
}

/// Build the layered configuration source.
///
/// # Errors
///
/// Returns a `ConfigError` if a source cannot be read.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Local overrides, not checked into git
        .add_source(File::with_name("config/local").required(false))
        // Eg.. `APP__ADMIN_CHAT_ID=1 ./target/app`
        .add_source(Environment::with_prefix("APP").separator("__"))
        // Plain UPPER_SNAKE_CASE variables, empty values treated as unset
        .add_source(Environment::default().ignore_empty(true))
        .build()
}

impl Settings {
    /// Create new settings by loading from environment and files
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use referral_bot::config::Settings;
    ///
    /// let settings = Settings::new().expect("Failed to load configuration");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails or no bot token is set.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_config(build_config()?)
    }

    /// Deserialize settings from an already built configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if deserialization fails or no bot token is set.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let mut settings: Self = config.try_deserialize()?;

        // Older deployments export the token as BOT_TOKEN
        if settings.telegram_token.is_empty() {
            if let Ok(val) = std::env::var("BOT_TOKEN") {
                settings.telegram_token = val;
            }
        }
        if settings.telegram_token.trim().is_empty() {
            return Err(ConfigError::NotFound("telegram_token".into()));
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn config_with(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let mut builder = Config::builder();
        for (key, value) in pairs {
            builder = builder.set_override(*key, *value)?;
        }
        builder.build()
    }

    #[test]
    fn test_defaults_applied() -> Result<(), ConfigError> {
        let settings = Settings::from_config(config_with(&[("telegram_token", "dummy")])?)?;

        assert_eq!(settings.telegram_token, "dummy");
        assert_eq!(settings.admin_chat_id, DEFAULT_ADMIN_CHAT_ID);
        assert_eq!(settings.referrals_file, DEFAULT_REFERRALS_FILE);
        assert_eq!(settings.start_image, DEFAULT_START_IMAGE);
        assert_eq!(settings.info_image, DEFAULT_INFO_IMAGE);
        assert_eq!(settings.bot_url, None);
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<(), ConfigError> {
        let settings = Settings::from_config(config_with(&[
            ("telegram_token", "dummy"),
            ("admin_chat_id", "12345"),
            ("referrals_file", "/data/refs.json"),
            ("bot_url", "https://t.me/promo_bot"),
        ])?)?;

        assert_eq!(settings.admin_chat_id, 12345);
        assert_eq!(settings.referrals_file, "/data/refs.json");
        assert_eq!(settings.bot_url.as_deref(), Some("https://t.me/promo_bot"));
        Ok(())
    }

    // Env-dependent checks stay in one test to avoid races between tests
    #[test]
    fn test_token_env_loading() -> Result<(), Box<dyn std::error::Error>> {
        env::remove_var("TELEGRAM_TOKEN");
        env::remove_var("BOT_TOKEN");

        // 1. No token anywhere
        let result = Settings::new();
        assert!(matches!(result, Err(ConfigError::NotFound(_))));

        // 2. Legacy variable
        env::set_var("BOT_TOKEN", "legacy_token");
        let settings = Settings::new()?;
        assert_eq!(settings.telegram_token, "legacy_token");

        // 3. Primary variable wins
        env::set_var("TELEGRAM_TOKEN", "primary_token");
        let settings = Settings::new()?;
        assert_eq!(settings.telegram_token, "primary_token");

        env::remove_var("TELEGRAM_TOKEN");
        env::remove_var("BOT_TOKEN");
        Ok(())
    }
}
