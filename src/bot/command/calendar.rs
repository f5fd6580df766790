//! `/calendar` command: where the calendar and its threads are shown.

use serenity::all::{ChannelType, CommandOptionType, CreateCommand, CreateCommandOption, Permissions};

use crate::{
    bot::command::{options::CommandOptions, CalendarCommand},
    error::{internal::InternalError, AppError},
};

pub const NAME: &str = "calendar";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Configure the event calendar")
        .default_member_permissions(Permissions::MANAGE_EVENTS)
        .dm_permission(false)
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "here",
            "Show the calendar in this channel",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "threads",
                "Set the channel event threads are opened in",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Thread channel, leave empty to use the calendar channel",
                )
                .channel_types(vec![ChannelType::Text]),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "refresh",
            "Re-post the calendar now",
        ))
}

/// Parses a `/calendar` subcommand used in `channel_id`.
pub fn parse(
    channel_id: u64,
    subcommand: &str,
    options: &CommandOptions,
) -> Result<CalendarCommand, AppError> {
    match subcommand {
        "here" => Ok(CalendarCommand::ShowHere(channel_id)),
        "threads" => Ok(CalendarCommand::SetThreadChannel(options.channel("channel"))),
        "refresh" => Ok(CalendarCommand::Refresh),
        other => Err(InternalError::UnexpectedCommandShape {
            command: NAME.to_string(),
            reason: format!("unknown subcommand '{}'", other),
        }
        .into()),
    }
}
