//! # Command System
//!
//! Slash command (/) definitions and handling for Discord interactions.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Registration moved to features::sync
//! - 1.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 1.0.0: Initial /ping and /info commands

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod slash;

pub use crate::command_handler::CommandHandler;

pub use context::CommandContext;
pub use handler::SlashCommandHandler;
pub use registry::CommandRegistry;

pub use slash::{create_slash_commands, desired_commands};
