use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::gateway::Ready;
use serenity::model::guild::{Guild, UnavailableGuild};
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use directory_bot::commands::context::ShardManagerContainer;
use directory_bot::commands::{desired_commands, CommandContext, CommandHandler};
use directory_bot::core::Config;
use directory_bot::features::directory::{DirectoryPublisher, PublishSchedule};
use directory_bot::features::sync::{
    command_name, CommandApi, CommandSynchronizer, SerenityCommandApi, SyncScope,
};

struct Handler {
    command_handler: Arc<CommandHandler>,
    config: Config,
    schedule: PublishSchedule,
}

impl Handler {
    fn new(command_handler: CommandHandler, config: Config) -> Self {
        Handler {
            command_handler: Arc::new(command_handler),
            config,
            schedule: PublishSchedule::new(),
        }
    }

    fn sync_scope(&self) -> SyncScope {
        match self.config.discord_guild_id {
            Some(guild_id) => SyncScope::Guild(GuildId(guild_id)),
            None => SyncScope::Global,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        let application_id = self
            .config
            .application_id
            .unwrap_or(ready.application.id.0);
        let api: Arc<dyn CommandApi> =
            Arc::new(SerenityCommandApi::new(ctx.http.clone(), application_id));

        let scope = self.sync_scope();
        match scope {
            SyncScope::Guild(guild_id) => {
                info!("🔧 Development mode: Registering commands for guild {guild_id}")
            }
            SyncScope::Global => info!("🌍 Production mode: Registering commands globally"),
        }

        let synchronizer = CommandSynchronizer::new(api.clone(), desired_commands());
        let registered = synchronizer.sync(scope).await;
        info!("{registered} commands registered in {scope}");

        if !self.config.publishing_enabled() {
            info!("📄 TOPGG_TOKEN not set - directory publishing disabled");
            return;
        }

        // Reconnects fire `ready` again; keep the schedule that is already running
        if self.schedule.is_running() {
            return;
        }

        let mut publisher =
            DirectoryPublisher::new(api, self.config.topgg_token.clone(), application_id)
                .with_scope(scope)
                .with_timeout(self.config.publish_timeout);
        if let Some(url) = &self.config.topgg_api_url {
            publisher = publisher.with_endpoint(url.clone());
        }

        self.schedule.start(
            Arc::new(publisher),
            self.config.publish_initial_delay,
            self.config.publish_interval,
        );
    }

    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: bool) {
        if is_new {
            info!("🆕 Joined new guild: {} ({})", guild.name, guild.id);
        }
    }

    async fn guild_delete(&self, _ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        if incomplete.unavailable {
            warn!("Guild {} became unavailable", incomplete.id);
            return;
        }

        match full {
            Some(guild) => info!("👋 Removed from guild: {} ({})", guild.name, guild.id),
            None => info!("👋 Removed from guild {}", incomplete.id),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                if let Err(e) = self
                    .command_handler
                    .handle_slash_command(&ctx, &command)
                    .await
                {
                    error!(
                        "Error handling slash command '{}': {}",
                        command.data.name, e
                    );

                    let error_message =
                        "❌ Sorry, I encountered an error processing your command. Please try again.";

                    // Edit the response if one was already sent, otherwise send a new one
                    #[allow(clippy::redundant_pattern_matching)]
                    if let Err(_) = command
                        .edit_original_interaction_response(&ctx.http, |response| {
                            response.content(error_message)
                        })
                        .await
                    {
                        let _ = command.create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(serenity::model::application::interaction::InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| {
                                    message.content(error_message).ephemeral(true)
                                })
                        }).await;
                    }
                }
            }
            Interaction::Ping(_) => {
                info!("Ping interaction received - Discord health check");
            }
            _ => {}
        }
    }
}

/// Any panic, on the main thread or inside a spawned task, is fatal
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("💥 Unrecoverable fault, shutting down: {panic_info}");
        std::process::exit(1);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().filter_or("LOG_LEVEL", "info"))
        .init();
    install_panic_hook();

    info!("Starting directory bot...");

    let config = Config::from_env().map_err(|e| {
        error!("Configuration error: {e}");
        anyhow::anyhow!("Invalid configuration: {}", e)
    })?;

    let command_handler = CommandHandler::new(CommandContext::new());
    let desired = desired_commands();
    let unhandled = command_handler
        .registry()
        .missing(desired.iter().filter_map(command_name));
    if !unhandled.is_empty() {
        warn!("⚠️ Slash commands without a handler: {}", unhandled.join(", "));
    }

    let application_id = config.application_id;
    let discord_token = config.discord_token.clone();
    let handler = Handler::new(command_handler, config);

    let intents = GatewayIntents::GUILDS;

    let mut builder = Client::builder(&discord_token, intents).event_handler(handler);
    if let Some(application_id) = application_id {
        builder = builder.application_id(application_id);
    }

    let mut client = builder.await.map_err(|e| {
        error!("Failed to create Discord client: {e}");
        error!("This could indicate:");
        error!("  - Invalid bot token format");
        error!("  - Network issues reaching Discord API");
        anyhow::anyhow!("Client creation failed: {}", e)
    })?;

    client
        .data
        .write()
        .await
        .insert::<ShardManagerContainer>(client.shard_manager.clone());

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
