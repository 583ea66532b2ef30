//! Utility command handlers
//!
//! Handles: ping, info
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.2.0: Report gateway latency in /ping
//! - 1.1.0: Report REST round trip in /ping
//! - 1.0.0: Initial /ping and /info

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use serenity::utils::Color;
use std::sync::Arc;
use std::time::Duration;

use crate::commands::context::{format_uptime, gateway_latency, CommandContext};
use crate::commands::handler::SlashCommandHandler;

/// Handler for utility commands: ping, info
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ping", "info"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "ping" => self.handle_ping(serenity_ctx, command).await,
            "info" => self.handle_info(&ctx, serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl UtilityHandler {
    /// Handle /ping command
    async fn handle_ping(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let reply = ping_reply(gateway_latency(serenity_ctx).await);

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content(&reply))
            })
            .await?;

        info!("Ping command completed for user {}", command.user.id);
        Ok(())
    }

    /// Handle /info command
    async fn handle_info(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let bot_name = serenity_ctx.cache.current_user().name;
        let guild_count = serenity_ctx.cache.guild_count();
        let uptime = format_uptime(ctx.uptime());
        let online_since = format!("<t:{}:R>", ctx.started_at.timestamp());

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.embed(|embed| {
                            embed
                                .title(format!("About {bot_name}"))
                                .description("A small bot that keeps its Top.gg command listing up to date.")
                                .color(Color::BLURPLE)
                                .field("Servers", guild_count, true)
                                .field("Uptime", &uptime, true)
                                .field("Online since", &online_since, true)
                                .field("Version", ctx.version, true)
                        })
                    })
            })
            .await?;

        info!("Info command completed for user {}", command.user.id);
        Ok(())
    }
}

/// `/ping` reply; latency is unknown until the shard's first heartbeat is acknowledged
fn ping_reply(latency: Option<Duration>) -> String {
    match latency {
        Some(latency) => format!("Pong! Gateway latency: {} ms", latency.as_millis()),
        None => "Pong!".to_string(),
    }
}
