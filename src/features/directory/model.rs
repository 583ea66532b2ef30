//! Command models read from Discord and written to the directory
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Application command type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum CommandKind {
    #[default]
    ChatInput,
    User,
    Message,
    PrimaryEntryPoint,
    Other(u8),
}

impl CommandKind {
    /// User and message context-menu commands
    pub fn is_context_menu(self) -> bool {
        matches!(self, CommandKind::User | CommandKind::Message)
    }
}

impl From<u8> for CommandKind {
    fn from(value: u8) -> Self {
        match value {
            1 => CommandKind::ChatInput,
            2 => CommandKind::User,
            3 => CommandKind::Message,
            4 => CommandKind::PrimaryEntryPoint,
            other => CommandKind::Other(other),
        }
    }
}

impl From<CommandKind> for u8 {
    fn from(kind: CommandKind) -> Self {
        match kind {
            CommandKind::ChatInput => 1,
            CommandKind::User => 2,
            CommandKind::Message => 3,
            CommandKind::PrimaryEntryPoint => 4,
            CommandKind::Other(other) => other,
        }
    }
}

/// A registered command as Discord reports it
#[derive(Debug, Clone, Deserialize)]
pub struct CommandDescriptor {
    #[serde(default, deserialize_with = "snowflake")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "snowflake")]
    pub application_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: CommandKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<OptionDescriptor>,
    #[serde(default, deserialize_with = "snowflake")]
    pub default_member_permissions: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,
    /// Kept as raw JSON so localizations and value types pass through untouched
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<OptionDescriptor>,
}

/// Command entry in the body POSTed to the directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryCommandPayload {
    pub id: String,
    pub application_id: String,
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: CommandKind,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<DirectoryOptionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryOptionPayload {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<DirectoryOptionPayload>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Snowflakes and permission bitsets arrive as strings, but older payloads use numbers
fn snowflake<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(u64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Str(s)) => Some(s),
        Some(Raw::Num(n)) => Some(n.to_string()),
        None => None,
    })
}
