//! Executing slash commands and replying to them.

use chrono::Utc;
use dioxus_logger::tracing;
use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
};

use crate::{
    bot::command::{parse_command, CalendarCommand},
    error::AppError,
    service::calendar::display::DisplayOutcome,
    state::AppState,
};

const GUILD_ONLY_REPLY: &str = "Calendar commands can only be used in a server.";
const MISSING_PERMISSION_REPLY: &str = "You need the Manage Events permission to do that.";
const INTERNAL_ERROR_REPLY: &str = "Something went wrong. Please try again later.";

/// Handles a slash command interaction, always answering with an ephemeral reply.
pub async fn handle_command(state: &AppState, ctx: Context, command: CommandInteraction) {
    let reply = match command_reply(state, &command).await {
        Ok(reply) => reply,
        Err(e) => error_reply(&command.data.name, &e),
    };

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(reply)
            .ephemeral(true),
    );

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to reply to /{}: {:?}", command.data.name, e);
    }
}

async fn command_reply(state: &AppState, command: &CommandInteraction) -> Result<String, AppError> {
    let Some(guild_id) = command.guild_id else {
        return Ok(GUILD_ONLY_REPLY.to_string());
    };

    // Registration already hides the commands; this covers overridden integrations.
    let can_manage = command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.manage_events());
    if !can_manage {
        return Ok(MISSING_PERMISSION_REPLY.to_string());
    }

    let parsed = parse_command(
        &command.data.name,
        &command.data.options(),
        guild_id.get(),
        command.channel_id.get(),
    )?;

    execute(state, guild_id.get(), parsed).await
}

/// Runs a parsed command and describes the result.
///
/// Calendar changes are published by a background refresh so the reply is not held up
/// by Discord; display commands refresh inline and report the outcome.
///
/// # Returns
/// - `Ok(String)` - Reply for the user
/// - `Err(AppError)` - The command failed; nothing is published
pub async fn execute(
    state: &AppState,
    guild_id: u64,
    command: CalendarCommand,
) -> Result<String, AppError> {
    let service = state.calendar_service();
    let changes_calendar = command.changes_calendar();

    let reply = match command {
        CalendarCommand::AddEvent(param) => {
            let event = service.add_event(param).await?;
            format!("Added **{}** (id {}).", event.title, event.id)
        }
        CalendarCommand::EditEvent { reference, changes } => {
            let event = service.edit_event(guild_id, &reference, changes).await?;
            format!("Updated **{}** (id {}).", event.title, event.id)
        }
        CalendarCommand::RemoveEvent(reference) => {
            let event = service.remove_event(guild_id, &reference).await?;
            format!("Removed **{}** (id {}).", event.title, event.id)
        }
        CalendarCommand::ShowHere(channel_id) => {
            service.set_display_channel(guild_id, channel_id).await?;
            let reply = match service.refresh_display(guild_id, Utc::now()).await? {
                DisplayOutcome::Edited(_) => "The calendar in this channel is up to date.",
                _ => "The calendar is now shown in this channel.",
            };
            reply.to_string()
        }
        CalendarCommand::SetThreadChannel(Some(channel_id)) => {
            service.set_thread_channel(guild_id, Some(channel_id)).await?;
            format!("Event threads will be opened in <#{}>.", channel_id)
        }
        CalendarCommand::SetThreadChannel(None) => {
            service.set_thread_channel(guild_id, None).await?;
            "Event threads will be opened in the calendar channel.".to_string()
        }
        CalendarCommand::Refresh => match service.refresh_display(guild_id, Utc::now()).await? {
            DisplayOutcome::NoChannel => {
                "No calendar channel is set. Use `/calendar here` first.".to_string()
            }
            _ => "Calendar refreshed.".to_string(),
        },
    };

    if changes_calendar {
        spawn_refresh(state.clone(), guild_id);
    }

    Ok(reply)
}

fn spawn_refresh(state: AppState, guild_id: u64) {
    tokio::spawn(async move {
        if let Err(e) = state
            .calendar_service()
            .refresh_display(guild_id, Utc::now())
            .await
        {
            tracing::error!("Failed to refresh calendar of guild {}: {}", guild_id, e);
        }
    });
}

/// User and Discord errors are explained; anything else is logged and hidden.
fn error_reply(command: &str, err: &AppError) -> String {
    match err {
        e if e.is_user_error() => {
            tracing::debug!("Rejected /{}: {}", command, e);
            e.to_string()
        }
        AppError::Gateway(e) => {
            tracing::warn!("Discord rejected /{}: {}", command, e);
            format!("Discord rejected the request: {}", e)
        }
        e => {
            tracing::error!("Failed to run /{}: {}", command, e);
            INTERNAL_ERROR_REPLY.to_string()
        }
    }
}
