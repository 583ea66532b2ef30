//! Shared context for command handlers
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Shard manager handle for gateway latency
//! - 1.0.0: Initial implementation

use chrono::{DateTime, Utc};
use serenity::client::bridge::gateway::{ShardId, ShardManager};
use serenity::prelude::{Context, Mutex, TypeMapKey};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Client data key for the shard manager, inserted by the binary after the client is built
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<Mutex<ShardManager>>;
}

/// Heartbeat latency of the shard serving `ctx`, once one has been measured
pub async fn gateway_latency(ctx: &Context) -> Option<Duration> {
    let manager = ctx.data.read().await.get::<ShardManagerContainer>()?.clone();
    let manager = manager.lock().await;
    let runners = manager.runners.lock().await;
    runners.get(&ShardId(ctx.shard_id))?.latency
}

/// Shared state handed to every command handler
#[derive(Clone, Debug)]
pub struct CommandContext {
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
    pub version: &'static str,
}

impl CommandContext {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Human readable uptime, e.g. `2d 3h 4m 5s`
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        (total % 86_400) / 3_600,
        (total % 3_600) / 60,
        total % 60,
    );

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {seconds}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
