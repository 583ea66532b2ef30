//! # Configuration
//!
//! Process configuration loaded from the environment (and `.env` via dotenvy in the binary).
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add publish schedule and request timeout knobs
//! - 1.0.0: Initial release with bot token, directory token and application id

use std::time::Duration;

use crate::core::error::ConfigError;

/// Default delay before the first directory publish after `ready`
pub const DEFAULT_INITIAL_DELAY_SECS: u64 = 5;

/// Default interval between directory publishes (24 hours)
pub const DEFAULT_PUBLISH_INTERVAL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Empty when publishing to the directory is disabled
    pub topgg_token: String,
    pub application_id: Option<u64>,
    /// Development guild; commands sync there instead of globally when set
    pub discord_guild_id: Option<u64>,
    pub topgg_api_url: Option<String>,
    pub publish_initial_delay: Duration,
    pub publish_interval: Duration,
    pub publish_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let discord_token = get("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        Ok(Config {
            discord_token,
            topgg_token: get("TOPGG_TOKEN").unwrap_or_default(),
            application_id: parse_opt(get("DISCORD_APPLICATION_ID"), "DISCORD_APPLICATION_ID")?,
            discord_guild_id: parse_opt(get("DISCORD_GUILD_ID"), "DISCORD_GUILD_ID")?,
            topgg_api_url: get("TOPGG_API_URL"),
            publish_initial_delay: Duration::from_secs(
                parse_opt(get("TOPGG_INITIAL_DELAY_SECS"), "TOPGG_INITIAL_DELAY_SECS")?
                    .unwrap_or(DEFAULT_INITIAL_DELAY_SECS),
            ),
            publish_interval: Duration::from_secs(non_zero(
                parse_opt(get("TOPGG_INTERVAL_SECS"), "TOPGG_INTERVAL_SECS")?
                    .unwrap_or(DEFAULT_PUBLISH_INTERVAL_SECS),
                "TOPGG_INTERVAL_SECS",
            )?),
            publish_timeout: parse_opt(get("TOPGG_TIMEOUT_SECS"), "TOPGG_TIMEOUT_SECS")?
                .map(Duration::from_secs),
        })
    }

    /// Whether directory publishing has a credential to work with
    pub fn publishing_enabled(&self) -> bool {
        !self.topgg_token.is_empty()
    }
}

fn parse_opt(value: Option<String>, key: &'static str) -> Result<Option<u64>, ConfigError> {
    value
        .map(|v| {
            v.parse::<u64>().map_err(|_| ConfigError::Invalid {
                key,
                value: v.clone(),
            })
        })
        .transpose()
}

fn non_zero(value: u64, key: &'static str) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        });
    }
    Ok(value)
}
