//! # Core Module
//!
//! Configuration and error types for the directory bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add error module with typed platform, conversion and publish errors
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::Config;
pub use error::{ConfigError, ConversionError, PlatformError, PublishError};
