//! # Directory Feature
//!
//! Keeps the bot's Top.gg listing in sync with its registered commands.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//! - **Toggleable**: true

pub mod converter;
pub mod model;
pub mod publisher;
pub mod schedule;

pub use converter::{convert, convert_all, convert_command, ConversionFailure, ConversionReport};
pub use model::{CommandDescriptor, CommandKind, DirectoryCommandPayload, OptionDescriptor};
pub use publisher::{DirectoryPublisher, Publish, PublishOutcome, TOPGG_COMMANDS_URL};
pub use schedule::PublishSchedule;
