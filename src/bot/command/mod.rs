//! Slash commands: registration and parsing into typed commands.
//!
//! Parsing never touches state. The interaction handler executes the parsed
//! `CalendarCommand` against the services.

pub mod calendar;
pub mod event;
pub mod options;

use serenity::all::{CreateCommand, ResolvedOption};

use crate::{
    bot::command::options::CommandOptions,
    error::{internal::InternalError, AppError},
    model::event::{CreateEventParam, EventReference, UpdateEventParam},
};

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCommand {
    AddEvent(CreateEventParam),
    EditEvent {
        reference: EventReference,
        changes: UpdateEventParam,
    },
    RemoveEvent(EventReference),
    /// Show the calendar in the given channel.
    ShowHere(u64),
    /// Open discussion threads in the given channel, or clear the setting.
    SetThreadChannel(Option<u64>),
    Refresh,
}

impl CalendarCommand {
    /// Whether executing the command changes what the calendar shows.
    pub fn changes_calendar(&self) -> bool {
        matches!(
            self,
            Self::AddEvent(_) | Self::EditEvent { .. } | Self::RemoveEvent(_)
        )
    }
}

/// Every command the bot registers.
pub fn commands() -> Vec<CreateCommand> {
    vec![event::register(), calendar::register()]
}

/// Parses an application command interaction.
///
/// # Arguments
/// - `name` - Top-level command name
/// - `options` - Resolved options of the interaction
/// - `guild_id` - Guild the command was used in
/// - `channel_id` - Channel the command was used in
///
/// # Returns
/// - `Ok(CalendarCommand)` - Parsed command
/// - `Err(AppError::Validation)` - The user's input was invalid
/// - `Err(AppError::InternalError)` - The interaction does not match the registration
pub fn parse_command(
    name: &str,
    options: &[ResolvedOption<'_>],
    guild_id: u64,
    channel_id: u64,
) -> Result<CalendarCommand, AppError> {
    let (subcommand, options) = CommandOptions::from_subcommand(name, options)?;

    match name {
        event::NAME => event::parse(guild_id, &subcommand, &options),
        calendar::NAME => calendar::parse(channel_id, &subcommand, &options),
        other => Err(InternalError::UnexpectedCommandShape {
            command: other.to_string(),
            reason: "unknown command".to_string(),
        }
        .into()),
    }
}
