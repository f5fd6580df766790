//! Flattened slash command options.
//!
//! Serenity's resolved options borrow from the interaction and nest subcommands. Commands
//! are parsed from this owned, flat form instead, which also lets the parsers be tested
//! without building interactions.

use serenity::all::{ResolvedOption, ResolvedValue};
use std::collections::HashMap;

use crate::error::{internal::InternalError, AppError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Text(String),
    Flag(bool),
    User(u64),
    Channel(u64),
}

/// Options of one (sub)command, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    command: String,
    values: HashMap<String, OptionValue>,
}

impl CommandOptions {
    /// Splits a command's resolved options into its subcommand name and that
    /// subcommand's options.
    ///
    /// # Arguments
    /// - `command` - Top-level command name, used in error messages
    /// - `options` - Resolved options of the interaction
    ///
    /// # Returns
    /// - `Ok((String, CommandOptions))` - Subcommand name and its options
    /// - `Err(AppError::InternalError)` - The interaction carried no subcommand
    pub fn from_subcommand(
        command: &str,
        options: &[ResolvedOption<'_>],
    ) -> Result<(String, Self), AppError> {
        let Some(ResolvedOption {
            name,
            value: ResolvedValue::SubCommand(inner),
            ..
        }) = options.first()
        else {
            return Err(InternalError::UnexpectedCommandShape {
                command: command.to_string(),
                reason: "missing subcommand".to_string(),
            }
            .into());
        };

        let mut parsed = Self::new(&format!("{} {}", command, name));
        for option in inner {
            let value = match &option.value {
                ResolvedValue::String(text) => OptionValue::Text(text.to_string()),
                ResolvedValue::Boolean(flag) => OptionValue::Flag(*flag),
                ResolvedValue::User(user, _) => OptionValue::User(user.id.get()),
                ResolvedValue::Channel(channel) => OptionValue::Channel(channel.id.get()),
                _ => continue,
            };
            parsed.values.insert(option.name.to_string(), value);
        }

        Ok((name.to_string(), parsed))
    }

    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            values: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with(mut self, name: &str, value: OptionValue) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    /// Non-blank text option, trimmed.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::Text(text)) => Some(text.trim()).filter(|t| !t.is_empty()),
            _ => None,
        }
    }

    /// Text option the command registration marks as required.
    pub fn required_text(&self, name: &str) -> Result<&str, AppError> {
        self.text(name).ok_or_else(|| {
            InternalError::UnexpectedCommandShape {
                command: self.command.clone(),
                reason: format!("missing option '{}'", name),
            }
            .into()
        })
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(OptionValue::Flag(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Option<u64> {
        match self.values.get(name) {
            Some(OptionValue::User(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn channel(&self, name: &str) -> Option<u64> {
        match self.values.get(name) {
            Some(OptionValue::Channel(id)) => Some(*id),
            _ => None,
        }
    }
}
