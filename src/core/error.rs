//! Error types shared across the bot
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Failure reported by the Discord command registration endpoints
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Discord API error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("Failed to encode command payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),
}

impl PlatformError {
    /// Bulk overwrite rejected because the scope holds an Entry Point command
    pub fn is_entry_point_conflict(&self) -> bool {
        self.to_string().to_lowercase().contains("entry point")
    }

    pub fn is_already_exists(&self) -> bool {
        self.to_string().to_lowercase().contains("already exists")
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("command has no id")]
    MissingId,

    #[error("command has no name")]
    MissingName,

    #[error("malformed command: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Error while sending HTTP request: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Failed to fetch registered commands: {0}")]
    Platform(#[from] PlatformError),

    #[error("Directory answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}
