//! Discord command registration endpoints
//!
//! Commands cross this boundary as raw JSON objects so fields the bot does not
//! model (localizations, integration types, Entry Point handlers) survive a
//! fetch → merge → overwrite round trip.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.1.0: Raw route requests instead of typed `Command` models
//! - 1.0.0: Initial implementation

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use serenity::http::request::RequestBuilder;
use serenity::http::routing::RouteInfo;
use serenity::http::Http;
use serenity::model::id::GuildId;

use crate::core::PlatformError;

/// Which command set a registration call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncScope {
    Global,
    Guild(GuildId),
}

impl fmt::Display for SyncScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncScope::Global => f.write_str("global"),
            SyncScope::Guild(guild_id) => write!(f, "guild {guild_id}"),
        }
    }
}

/// Command registration endpoints consumed by the synchronizer and publisher
#[async_trait]
pub trait CommandApi: Send + Sync {
    /// Fetch the commands currently registered in `scope`
    async fn fetch_commands(&self, scope: SyncScope) -> Result<Vec<Value>, PlatformError>;

    /// Replace every command in `scope` with `commands`, returning what the platform now holds
    async fn overwrite_commands(
        &self,
        scope: SyncScope,
        commands: &[Value],
    ) -> Result<Vec<Value>, PlatformError>;

    /// Register a single command in `scope`
    async fn create_command(&self, scope: SyncScope, command: &Value)
        -> Result<Value, PlatformError>;
}

/// Localizations are requested so a bulk overwrite does not strip them from preserved commands
fn fetch_route(scope: SyncScope, application_id: u64) -> RouteInfo<'static> {
    match scope {
        SyncScope::Global => RouteInfo::GetGlobalApplicationCommands {
            application_id,
            with_localizations: true,
        },
        SyncScope::Guild(guild_id) => RouteInfo::GetGuildApplicationCommands {
            application_id,
            guild_id: guild_id.0,
            with_localizations: true,
        },
    }
}

/// [`CommandApi`] backed by serenity's HTTP client
#[derive(Clone)]
pub struct SerenityCommandApi {
    http: Arc<Http>,
    application_id: u64,
}

impl SerenityCommandApi {
    pub fn new(http: Arc<Http>, application_id: u64) -> Self {
        Self {
            http,
            application_id,
        }
    }

    pub fn application_id(&self) -> u64 {
        self.application_id
    }

    async fn send<T>(&self, route: RouteInfo<'_>, body: Option<&Value>) -> Result<T, PlatformError>
    where
        T: serde::de::DeserializeOwned,
    {
        let bytes = body.map(serde_json::to_vec).transpose()?;
        let mut request = RequestBuilder::new(route);
        if let Some(bytes) = &bytes {
            request.body(Some(bytes.as_slice()));
        }
        Ok(self.http.fire::<T>(request.build()).await?)
    }
}

#[async_trait]
impl CommandApi for SerenityCommandApi {
    async fn fetch_commands(&self, scope: SyncScope) -> Result<Vec<Value>, PlatformError> {
        self.send(fetch_route(scope, self.application_id), None).await
    }

    async fn overwrite_commands(
        &self,
        scope: SyncScope,
        commands: &[Value],
    ) -> Result<Vec<Value>, PlatformError> {
        let application_id = self.application_id;
        let route = match scope {
            SyncScope::Global => RouteInfo::CreateGlobalApplicationCommands { application_id },
            SyncScope::Guild(guild_id) => RouteInfo::CreateGuildApplicationCommands {
                application_id,
                guild_id: guild_id.0,
            },
        };
        let body = Value::Array(commands.to_vec());
        self.send(route, Some(&body)).await
    }

    async fn create_command(
        &self,
        scope: SyncScope,
        command: &Value,
    ) -> Result<Value, PlatformError> {
        let application_id = self.application_id;
        let route = match scope {
            SyncScope::Global => RouteInfo::CreateGlobalApplicationCommand { application_id },
            SyncScope::Guild(guild_id) => RouteInfo::CreateGuildApplicationCommand {
                application_id,
                guild_id: guild_id.0,
            },
        };
        self.send(route, Some(command)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_display() {
        assert_eq!(SyncScope::Global.to_string(), "global");
        assert_eq!(SyncScope::Guild(GuildId(42)).to_string(), "guild 42");
    }

    #[test]
    fn test_command_api_is_object_safe() {
        fn _assert_object_safe(_: &dyn CommandApi) {}
    }

    #[test]
    fn test_fetch_routes_request_localizations() {
        assert!(matches!(
            fetch_route(SyncScope::Global, 7),
            RouteInfo::GetGlobalApplicationCommands {
                application_id: 7,
                with_localizations: true,
                ..
            }
        ));
        assert!(matches!(
            fetch_route(SyncScope::Guild(GuildId(42)), 7),
            RouteInfo::GetGuildApplicationCommands {
                application_id: 7,
                guild_id: 42,
                with_localizations: true,
                ..
            }
        ));
    }
}
