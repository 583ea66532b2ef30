//! Conversion from Discord command JSON to the directory's command format
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.1.0: Collect per-command failures into a ConversionReport
//! - 1.0.0: Initial implementation

use log::warn;
use serde_json::Value;

use super::model::{
    CommandDescriptor, DirectoryCommandPayload, DirectoryOptionPayload, OptionDescriptor,
};
use crate::core::ConversionError;

/// Placeholder for chat-input commands without a description
pub const COMMAND_DESCRIPTION_PLACEHOLDER: &str = "No description";

/// Placeholder for options without a description
pub const OPTION_DESCRIPTION_PLACEHOLDER: &str = "Parameter";

/// The directory only accepts this command version
pub const DIRECTORY_COMMAND_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionFailure {
    /// Command name, or its position in the batch when it has none
    pub command: String,
    pub error: ConversionError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    pub converted: Vec<DirectoryCommandPayload>,
    pub failures: Vec<ConversionFailure>,
}

/// Convert one raw command. `application_id` is used when the command omits its own.
pub fn convert_command(
    raw: &Value,
    application_id: u64,
) -> Result<DirectoryCommandPayload, ConversionError> {
    let descriptor: CommandDescriptor = serde_json::from_value(raw.clone())
        .map_err(|e| ConversionError::Malformed(e.to_string()))?;
    convert_descriptor(descriptor, application_id)
}

pub fn convert_descriptor(
    command: CommandDescriptor,
    application_id: u64,
) -> Result<DirectoryCommandPayload, ConversionError> {
    let id = command.id.ok_or(ConversionError::MissingId)?;
    if command.name.is_empty() {
        return Err(ConversionError::MissingName);
    }

    // Context-menu commands have no description on Discord, but the directory requires the field
    let description = if command.kind.is_context_menu() {
        String::new()
    } else {
        command
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| COMMAND_DESCRIPTION_PLACEHOLDER.to_string())
    };

    Ok(DirectoryCommandPayload {
        id,
        application_id: command
            .application_id
            .unwrap_or_else(|| application_id.to_string()),
        name: command.name,
        version: DIRECTORY_COMMAND_VERSION.to_string(),
        kind: command.kind,
        description,
        options: command.options.into_iter().map(convert_option).collect(),
        default_member_permissions: command.default_member_permissions,
    })
}

fn convert_option(option: OptionDescriptor) -> DirectoryOptionPayload {
    DirectoryOptionPayload {
        name: option.name,
        description: option
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| OPTION_DESCRIPTION_PLACEHOLDER.to_string()),
        kind: option.kind,
        required: option.required,
        choices: option.choices,
        options: option.options.into_iter().map(convert_option).collect(),
    }
}

/// Convert a single command, logging and discarding it on failure
pub fn convert(raw: &Value, application_id: u64) -> Option<DirectoryCommandPayload> {
    match convert_command(raw, application_id) {
        Ok(payload) => Some(payload),
        Err(e) => {
            warn!("Skipping command {}: {e}", describe(raw, 0));
            None
        }
    }
}

/// Convert a batch; a failing command never aborts the rest
pub fn convert_all(commands: &[Value], application_id: u64) -> ConversionReport {
    let mut report = ConversionReport::default();

    for (index, raw) in commands.iter().enumerate() {
        match convert_command(raw, application_id) {
            Ok(payload) => report.converted.push(payload),
            Err(error) => {
                let command = describe(raw, index);
                warn!("Skipping command {command}: {error}");
                report.failures.push(ConversionFailure { command, error });
            }
        }
    }

    report
}

fn describe(raw: &Value, index: usize) -> String {
    match raw.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => format!("/{name}"),
        _ => format!("#{index}"),
    }
}
