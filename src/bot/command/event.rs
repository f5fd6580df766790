//! `/event` command: add, edit and remove calendar events.

use chrono::NaiveTime;
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, Permissions};

use crate::{
    bot::command::{options::CommandOptions, CalendarCommand},
    error::{internal::InternalError, validation::ValidationError, AppError},
    model::event::{CreateEventParam, EventReference, EventSchedule, UpdateEventParam},
    util::parse::{parse_date_input, parse_time, DateInput},
};

pub const NAME: &str = "event";

/// Description value that clears an event's description when editing.
const CLEAR_DESCRIPTION: &str = "-";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Manage calendar events")
        .default_member_permissions(Permissions::MANAGE_EVENTS)
        .dm_permission(false)
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "add", "Add an event")
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::String, "title", "Event title")
                        .required(true)
                        .max_length(100),
                )
                .add_sub_option(date_option("Date (DD/MM/YYYY), leave empty or 'tbc' if unknown"))
                .add_sub_option(time_option())
                .add_sub_option(description_option("What the event is about"))
                .add_sub_option(organiser_option())
                .add_sub_option(squad_maker_option())
                .add_sub_option(recurring_option()),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "edit", "Edit an event")
                .add_sub_option(event_option())
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "title",
                    "New title",
                ))
                .add_sub_option(date_option("New date (DD/MM/YYYY), or 'tbc' to clear it"))
                .add_sub_option(time_option())
                .add_sub_option(description_option("New description, or '-' to clear it"))
                .add_sub_option(organiser_option())
                .add_sub_option(squad_maker_option())
                .add_sub_option(recurring_option()),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "remove", "Remove an event")
                .add_sub_option(event_option()),
        )
}

fn event_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "event", "Event id or exact title")
        .required(true)
}

fn date_option(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "date", description)
}

fn time_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "time", "Start time (HH:MM, 24 hour)")
}

fn description_option(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "description", description)
        .max_length(700)
}

fn organiser_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::User, "organiser", "Who runs the event")
}

fn squad_maker_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::User, "squad_maker", "Who makes the squads")
}

fn recurring_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::Boolean, "recurring", "Repeat every week")
}

/// Parses an `/event` subcommand.
///
/// # Arguments
/// - `guild_id` - Guild the command was used in
/// - `subcommand` - `add`, `edit` or `remove`
/// - `options` - The subcommand's options
///
/// # Returns
/// - `Ok(CalendarCommand)` - Parsed command
/// - `Err(AppError::Validation)` - Bad date or time, or an edit without changes
pub fn parse(
    guild_id: u64,
    subcommand: &str,
    options: &CommandOptions,
) -> Result<CalendarCommand, AppError> {
    match subcommand {
        "add" => parse_add(guild_id, options).map(CalendarCommand::AddEvent),
        "edit" => Ok(CalendarCommand::EditEvent {
            reference: EventReference::parse(options.required_text("event")?),
            changes: parse_edit(options)?,
        }),
        "remove" => Ok(CalendarCommand::RemoveEvent(EventReference::parse(
            options.required_text("event")?,
        ))),
        other => Err(InternalError::UnexpectedCommandShape {
            command: NAME.to_string(),
            reason: format!("unknown subcommand '{}'", other),
        }
        .into()),
    }
}

fn parse_add(guild_id: u64, options: &CommandOptions) -> Result<CreateEventParam, AppError> {
    let date = match options.text("date").map(parse_date_input).transpose()? {
        Some(DateInput::Date(date)) => Some(date),
        Some(DateInput::Tbc) | None => None,
    };
    let time = parse_time_option(options)?;

    let schedule = match (date, time) {
        (Some(date), time) => Some(EventSchedule { date, time }),
        (None, Some(_)) => return Err(ValidationError::TimeWithoutDate.into()),
        (None, None) => None,
    };

    Ok(CreateEventParam {
        guild_id,
        title: options.required_text("title")?.to_string(),
        description: options.text("description").map(str::to_string),
        schedule,
        organiser_id: options.user("organiser"),
        squad_maker_id: options.user("squad_maker"),
        recurring: options.flag("recurring").unwrap_or(false),
    })
}

fn parse_edit(options: &CommandOptions) -> Result<UpdateEventParam, AppError> {
    let date = match options.text("date").map(parse_date_input).transpose()? {
        Some(DateInput::Date(date)) => Some(Some(date)),
        Some(DateInput::Tbc) => Some(None),
        None => None,
    };

    let description = options.text("description").map(|description| {
        (description != CLEAR_DESCRIPTION).then(|| description.to_string())
    });

    let changes = UpdateEventParam {
        title: options.text("title").map(str::to_string),
        description,
        date,
        time: parse_time_option(options)?,
        organiser_id: options.user("organiser").map(Some),
        squad_maker_id: options.user("squad_maker").map(Some),
        recurring: options.flag("recurring"),
    };

    if changes.is_empty() {
        return Err(ValidationError::NoChanges.into());
    }

    Ok(changes)
}

fn parse_time_option(options: &CommandOptions) -> Result<Option<NaiveTime>, ValidationError> {
    options.text("time").map(parse_time).transpose()
}
