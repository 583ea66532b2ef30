//! Per-command handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all command handlers, ready to be registered with a CommandRegistry
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![Arc::new(utility::UtilityHandler)]
}
