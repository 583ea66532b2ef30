//! # Feature: Command Synchronization
//!
//! Reconciles the bot's slash commands with what Discord already has registered
//! in a scope. Commands registered by other means (e.g. Entry Point commands)
//! are preserved; the bot's own commands are replaced in place or appended.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Per-command outcomes collected into a SyncReport
//! - 1.1.0: Fall back to individual creation on Entry Point conflicts
//! - 1.0.0: Initial bulk overwrite registration

use std::sync::Arc;

use log::{error, info, warn};
use serde_json::Value;

use super::platform::{CommandApi, SyncScope};

/// How a sync cycle ended up registering commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Single overwrite-all call succeeded
    Bulk,
    /// Bulk call hit an Entry Point conflict; commands were created one by one
    Individual,
    /// Bulk call failed for another reason; registration left untouched
    Failed,
}

/// A command that could not be registered, with the platform's reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub scope: SyncScope,
    pub mode: SyncMode,
    /// Commands registered in the scope after a bulk sync, or newly created in fallback mode
    pub registered: usize,
    pub failures: Vec<CommandFailure>,
}

/// Name of a raw command object, if it has one
pub fn command_name(command: &Value) -> Option<&str> {
    command.get("name").and_then(Value::as_str)
}

/// Merge `desired` into `existing` by command name.
///
/// A desired command whose name is already registered replaces that entry at its
/// original position; any other desired command is appended. Existing commands
/// with no desired counterpart are kept as-is.
pub fn merge_by_name(existing: Vec<Value>, desired: Vec<Value>) -> Vec<Value> {
    let mut combined = existing;

    for command in desired {
        let position = command_name(&command).and_then(|name| {
            combined
                .iter()
                .position(|registered| command_name(registered) == Some(name))
        });

        match position {
            Some(index) => combined[index] = command,
            None => combined.push(command),
        }
    }

    combined
}

pub struct CommandSynchronizer {
    api: Arc<dyn CommandApi>,
    desired: Vec<Value>,
}

impl CommandSynchronizer {
    pub fn new(api: Arc<dyn CommandApi>, desired: Vec<Value>) -> Self {
        Self { api, desired }
    }

    /// Synchronize commands in `scope`, returning how many are now registered there
    pub async fn sync(&self, scope: SyncScope) -> usize {
        self.sync_report(scope).await.registered
    }

    pub async fn sync_report(&self, scope: SyncScope) -> SyncReport {
        let existing = match self.api.fetch_commands(scope).await {
            Ok(commands) => commands,
            Err(e) => {
                warn!("Failed to fetch existing {scope} commands, assuming none: {e}");
                Vec::new()
            }
        };

        let existing_count = existing.len();
        let combined = merge_by_name(existing, self.desired.clone());
        info!(
            "Syncing {} {scope} commands ({existing_count} already registered, {} owned by this bot)",
            combined.len(),
            self.desired.len()
        );

        match self.api.overwrite_commands(scope, &combined).await {
            Ok(registered) => {
                info!("✅ Bulk registered {} {scope} commands", registered.len());
                SyncReport {
                    scope,
                    mode: SyncMode::Bulk,
                    registered: registered.len(),
                    failures: Vec::new(),
                }
            }
            Err(e) if e.is_entry_point_conflict() => {
                warn!("Bulk overwrite rejected by Entry Point command, registering {scope} commands individually: {e}");
                self.create_individually(scope).await
            }
            Err(e) => {
                error!("❌ Failed to register {scope} commands: {e}");
                SyncReport {
                    scope,
                    mode: SyncMode::Failed,
                    registered: 0,
                    failures: vec![CommandFailure {
                        name: "*".to_string(),
                        reason: e.to_string(),
                    }],
                }
            }
        }
    }

    async fn create_individually(&self, scope: SyncScope) -> SyncReport {
        let mut registered = 0;
        let mut failures = Vec::new();

        for command in &self.desired {
            let name = command_name(command).unwrap_or("<unnamed>").to_string();

            match self.api.create_command(scope, command).await {
                Ok(_) => {
                    info!("Registered /{name} in {scope}");
                    registered += 1;
                }
                Err(e) if e.is_already_exists() => {
                    info!("/{name} already exists in {scope}, skipping");
                    failures.push(CommandFailure {
                        name,
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    error!("Failed to register /{name} in {scope}: {e}");
                    failures.push(CommandFailure {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Individually registered {registered}/{} {scope} commands",
            self.desired.len()
        );

        SyncReport {
            scope,
            mode: SyncMode::Individual,
            registered,
            failures,
        }
    }
}
