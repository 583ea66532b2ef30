//! # Slash Commands (/)
//!
//! Definitions of the commands this bot owns. Registration itself lives in
//! `features::sync`, which merges these with whatever is already registered.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Registration moved to the command synchronizer
//! - 1.0.0: Initial /ping and /info commands

mod utility;

use serde_json::Value;
use serenity::builder::CreateApplicationCommand;

/// Creates all slash command definitions
pub fn create_slash_commands() -> Vec<CreateApplicationCommand> {
    let mut commands = Vec::new();

    // Utility commands
    commands.extend(utility::create_commands());

    commands
}

/// Slash command definitions as the JSON bodies sent to Discord's registration endpoints
pub fn desired_commands() -> Vec<Value> {
    create_slash_commands()
        .into_iter()
        .map(|command| {
            Value::Object(
                command
                    .0
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value))
                    .collect(),
            )
        })
        .collect()
}
