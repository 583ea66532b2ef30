//! # Command Sync Feature
//!
//! Registers the bot's slash commands with Discord without clobbering commands
//! registered by other means.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false

pub mod platform;
pub mod synchronizer;

pub use platform::{CommandApi, SerenityCommandApi, SyncScope};
pub use synchronizer::{
    command_name, merge_by_name, CommandFailure, CommandSynchronizer, SyncMode, SyncReport,
};
