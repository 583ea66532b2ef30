// Core layer - configuration and error types
pub mod core;

// Features layer - command sync and directory publishing
pub mod features;

// Application layer
pub mod command_handler;
pub mod commands;

pub use crate::core::Config;

pub use features::{
    // Directory
    DirectoryPublisher, Publish, PublishSchedule,
    // Sync
    CommandApi, CommandSynchronizer, SerenityCommandApi, SyncScope,
};
