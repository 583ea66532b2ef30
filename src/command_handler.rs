//! Slash command dispatch
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Dispatch through CommandRegistry only
//! - 1.0.0: Initial implementation

use anyhow::Result;
use log::{info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handlers::create_all_handlers;
use crate::commands::registry::CommandRegistry;

#[derive(Clone)]
pub struct CommandHandler {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
}

impl CommandHandler {
    pub fn new(context: CommandContext) -> Self {
        Self {
            registry: CommandRegistry::from_handlers(create_all_handlers()),
            context: Arc::new(context),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        info!(
            "[{request_id}] /{} from user {} in {}",
            command.data.name,
            command.user.id,
            command
                .guild_id
                .map(|id| format!("guild {id}"))
                .unwrap_or_else(|| "DMs".to_string())
        );

        match self.registry.get(&command.data.name) {
            Some(handler) => handler.handle(self.context.clone(), ctx, command).await,
            None => {
                warn!("[{request_id}] No handler registered for /{}", command.data.name);
                command
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content("❓ Unknown command.").ephemeral(true)
                            })
                    })
                    .await?;
                Ok(())
            }
        }
    }
}
