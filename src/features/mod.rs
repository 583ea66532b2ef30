//! # Features
//!
//! - `sync`: slash command registration with Entry Point fallback
//! - `directory`: Top.gg command listing publisher and its schedule

pub mod directory;
pub mod sync;

pub use directory::{DirectoryPublisher, Publish, PublishSchedule};
pub use sync::{CommandApi, CommandSynchronizer, SerenityCommandApi, SyncScope};
