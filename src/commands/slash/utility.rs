//! # Utility Commands
//!
//! `/ping` and `/info`.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_ping_command(), create_info_command()]
}

fn create_ping_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("ping")
        .description("Check if the bot is alive and measure response time");
    command
}

fn create_info_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("info")
        .description("Show information about the bot");
    command
}
