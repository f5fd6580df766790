//! Calendar management operations.
//!
//! `CalendarService` is the entry point for everything a guild's members can do to their
//! calendar: adding, editing and removing events, choosing where the summary and
//! discussion threads live, and re-publishing the summary. Inputs arrive already parsed;
//! this layer enforces the semantic rules before anything is persisted.

pub mod display;
pub mod render;

use dioxus_logger::tracing;
use std::sync::Arc;

use crate::{
    config::CalendarSettings,
    data::{event::EventRepository, guild_display::GuildDisplayRepository, DataStore},
    discord::DiscordGateway,
    error::{validation::ValidationError, AppError},
    model::{
        event::{
            CreateEventParam, Event, EventReference, EventSchedule, UpdateEventParam,
            MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH,
        },
        guild_display::GuildDisplay,
    },
};

/// Service for managing a guild's calendar.
pub struct CalendarService<'a> {
    /// Persisted events and display state
    pub store: &'a DataStore,
    /// Discord API used to publish the summary and tidy up threads
    pub gateway: Arc<dyn DiscordGateway>,
    /// Rendering and scheduling tunables
    pub settings: &'a CalendarSettings,
}

impl<'a> CalendarService<'a> {
    /// Creates a new CalendarService instance.
    ///
    /// # Arguments
    /// - `store` - Reference to the data store
    /// - `gateway` - Discord API gateway
    /// - `settings` - Calendar settings
    ///
    /// # Returns
    /// - `CalendarService` - New service instance
    pub fn new(
        store: &'a DataStore,
        gateway: Arc<dyn DiscordGateway>,
        settings: &'a CalendarSettings,
    ) -> Self {
        Self {
            store,
            gateway,
            settings,
        }
    }

    /// Adds a new event to a guild's calendar.
    ///
    /// # Arguments
    /// - `param` - Parsed event details
    ///
    /// # Returns
    /// - `Ok(Event)` - The stored event with its assigned id
    /// - `Err(AppError::Validation)` - Empty or overlong title, overlong description, or a
    ///   recurring event without a date
    /// - `Err(AppError)` - Storage failure
    pub async fn add_event(&self, mut param: CreateEventParam) -> Result<Event, AppError> {
        param.title = validate_title(&param.title)?;
        param.description = normalize_description(param.description)?;

        if param.recurring && param.schedule.is_none() {
            return Err(ValidationError::RecurringWithoutDate.into());
        }

        let event = EventRepository::new(self.store).create(param).await?;

        tracing::info!(
            "Added event {} '{}' to guild {}",
            event.id,
            event.title,
            event.guild_id
        );

        Ok(event)
    }

    /// Edits an event of a guild.
    ///
    /// Switching between recurring and one-off drops the threads recorded for the old
    /// mode; they are archived once the change is stored.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the event belongs to
    /// - `reference` - Event id or unique title
    /// - `param` - Changes to apply
    ///
    /// # Returns
    /// - `Ok(Event)` - The event after the edit
    /// - `Err(AppError::NotFound)` - No such event in the guild
    /// - `Err(AppError::Validation)` - The edit would break an event invariant; nothing
    ///   was stored
    pub async fn edit_event(
        &self,
        guild_id: u64,
        reference: &EventReference,
        mut param: UpdateEventParam,
    ) -> Result<Event, AppError> {
        if let Some(title) = &param.title {
            param.title = Some(validate_title(title)?);
        }
        if let Some(description) = param.description.take() {
            param.description = Some(normalize_description(description)?);
        }

        let repo = EventRepository::new(self.store);
        let target = repo.resolve(guild_id, reference).await?;

        let (event, orphaned) = repo
            .update(guild_id, target.id, |event| apply_update(event, param))
            .await?;

        tracing::info!(
            "Edited event {} '{}' in guild {}",
            event.id,
            event.title,
            guild_id
        );

        self.archive_best_effort(&orphaned).await;

        Ok(event)
    }

    /// Removes an event from a guild's calendar and archives its threads.
    ///
    /// # Returns
    /// - `Ok(Event)` - The removed event
    /// - `Err(AppError::NotFound)` - No such event in the guild
    pub async fn remove_event(
        &self,
        guild_id: u64,
        reference: &EventReference,
    ) -> Result<Event, AppError> {
        let repo = EventRepository::new(self.store);
        let target = repo.resolve(guild_id, reference).await?;
        let event = repo.delete(guild_id, target.id).await?;

        tracing::info!(
            "Removed event {} '{}' from guild {}",
            event.id,
            event.title,
            guild_id
        );

        self.archive_best_effort(&event.recorded_threads()).await;

        Ok(event)
    }

    /// Makes `channel_id` the guild's summary channel.
    ///
    /// Moving to a new channel forgets the old summary message so the next refresh posts
    /// a fresh one.
    pub async fn set_display_channel(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<GuildDisplay, AppError> {
        let display = GuildDisplayRepository::new(self.store)
            .update(guild_id, |display| {
                if display.channel_id != Some(channel_id) {
                    display.channel_id = Some(channel_id);
                    display.message_id = None;
                }
            })
            .await?;

        tracing::info!(
            "Calendar for guild {} now shown in channel {}",
            guild_id,
            channel_id
        );

        Ok(display)
    }

    /// Sets (or with `None`, clears) the channel discussion threads are opened in.
    pub async fn set_thread_channel(
        &self,
        guild_id: u64,
        channel_id: Option<u64>,
    ) -> Result<GuildDisplay, AppError> {
        let display = GuildDisplayRepository::new(self.store)
            .update(guild_id, |display| display.thread_channel_id = channel_id)
            .await?;

        tracing::info!(
            "Thread channel for guild {} set to {:?}",
            guild_id,
            channel_id
        );

        Ok(display)
    }

    /// Archives threads that are no longer referenced, logging failures.
    async fn archive_best_effort(&self, thread_ids: &[u64]) {
        for thread_id in thread_ids {
            if let Err(e) = self.gateway.archive_thread(*thread_id).await {
                tracing::warn!("Failed to archive orphaned thread {}: {}", thread_id, e);
            }
        }
    }
}

/// Trims a title and checks its length.
fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong {
            max: MAX_TITLE_LENGTH,
        });
    }

    Ok(title.to_string())
}

/// Trims a description, treating blank ones as absent.
fn normalize_description(description: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(description) = description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
    else {
        return Ok(None);
    };

    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(Some(description))
}

/// Applies validated changes to an event.
///
/// # Returns
/// - `Ok(Vec<u64>)` - Threads no longer referenced by the event
/// - `Err(AppError::Validation)` - The result would be inconsistent; the event is left
///   as the caller must discard it
fn apply_update(event: &mut Event, param: UpdateEventParam) -> Result<Vec<u64>, AppError> {
    let current = event.schedule();

    let date = match param.date {
        Some(date) => date,
        None => current.map(|schedule| schedule.date),
    };
    let time = match param.time {
        Some(time) => Some(time),
        None => current.and_then(|schedule| schedule.time),
    };

    let schedule = match date {
        Some(date) => Some(EventSchedule { date, time }),
        None if param.time.is_some() => return Err(ValidationError::TimeWithoutDate.into()),
        None => None,
    };

    let recurring = param.recurring.unwrap_or(event.recurring);
    if recurring && schedule.is_none() {
        return Err(ValidationError::RecurringWithoutDate.into());
    }

    if let Some(title) = param.title {
        event.title = title;
    }
    if let Some(description) = param.description {
        event.description = description;
    }
    if let Some(organiser_id) = param.organiser_id {
        event.organiser_id = organiser_id;
    }
    if let Some(squad_maker_id) = param.squad_maker_id {
        event.squad_maker_id = squad_maker_id;
    }
    if schedule != current {
        event.set_schedule(schedule);
    }

    Ok(event.set_recurring(recurring))
}
