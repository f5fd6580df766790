//! Event data repository.
//!
//! This module provides the `EventRepository` for reading and mutating the persisted event
//! list. Every mutation loads the whole list, applies the change and writes the whole list
//! back while holding the document lock. The decoded list only replaces the stored one once
//! the write succeeded, so a failed write never leaves callers with state that is not on
//! disk.

use chrono::NaiveDate;
use dioxus_logger::tracing;
use serde_json::Value;
use std::collections::HashSet;

use crate::{
    data::{document::DocumentGuard, DataStore},
    error::{validation::ValidationError, AppError},
    model::event::{CreateEventParam, Event, EventReference},
};

/// Result of recording a freshly created discussion thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadRecord {
    /// The thread is now the occurrence's thread.
    Recorded,
    /// Another thread was recorded first; the new one is surplus.
    AlreadyRecorded(u64),
    /// The event was removed or rescheduled away in the meantime.
    EventGone,
}

/// Repository providing operations on the persisted event list.
pub struct EventRepository<'a> {
    store: &'a DataStore,
}

impl<'a> EventRepository<'a> {
    /// Creates a new EventRepository instance.
    ///
    /// # Arguments
    /// - `store` - Reference to the data store
    pub fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    /// Loads every stored event.
    ///
    /// Records are decoded one by one: malformed records are skipped with a warning and
    /// inconsistent ones are repaired. Repairs are only persisted by the next mutation.
    pub async fn get_all(&self) -> Result<Vec<Event>, AppError> {
        let guard = self.store.events.lock().await;
        let (events, _) = load_events(&guard).await?;
        Ok(events)
    }

    /// Loads the events of one guild, in stored order.
    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<Event>, AppError> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .filter(|event| event.guild_id == guild_id)
            .collect())
    }

    /// Finds the event a command refers to within a guild.
    ///
    /// # Returns
    /// - `Ok(Event)` - Exactly one event matched
    /// - `Err(AppError::NotFound)` - No event in the guild matched
    /// - `Err(AppError::Validation(AmbiguousTitle))` - Several events share the title
    pub async fn resolve(
        &self,
        guild_id: u64,
        reference: &EventReference,
    ) -> Result<Event, AppError> {
        let events = self.get_by_guild(guild_id).await?;
        resolve_in(&events, reference).cloned()
    }

    /// Runs one locked read-modify-write cycle over the whole event list.
    ///
    /// The closure works on a copy. The copy is written back only if the closure succeeds
    /// and something changed (including repairs made while decoding).
    ///
    /// # Arguments
    /// - `mutate` - Change to apply; returning an error aborts without writing
    ///
    /// # Returns
    /// - `Ok(R)` - The closure's result, after the list was persisted
    /// - `Err(AppError)` - The closure's error, or a read/write failure
    pub async fn modify<R>(
        &self,
        mutate: impl FnOnce(&mut Vec<Event>) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let guard = self.store.events.lock().await;
        let (original, repaired) = load_events(&guard).await?;

        let mut events = original.clone();
        let result = mutate(&mut events)?;

        if repaired || events != original {
            guard.write(&events).await?;
        }

        Ok(result)
    }

    /// Stores a new event and assigns it the next free id.
    ///
    /// # Returns
    /// - `Ok(Event)` - The stored event
    /// - `Err(AppError)` - Read/write failure
    pub async fn create(&self, param: CreateEventParam) -> Result<Event, AppError> {
        self.modify(|events| {
            let mut event = Event {
                id: next_id(events),
                guild_id: param.guild_id,
                title: param.title,
                description: param.description,
                anchor_datetime: None,
                has_time: false,
                original_hour: 0,
                original_minute: 0,
                organiser_id: param.organiser_id,
                squad_maker_id: param.squad_maker_id,
                recurring: param.recurring,
                thread_id: None,
                thread_info: Default::default(),
                create_threads: true,
            };
            event.set_schedule(param.schedule);

            events.push(event.clone());
            Ok(event)
        })
        .await
    }

    /// Applies a change to one event of a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the event must belong to
    /// - `event_id` - Event to change
    /// - `update` - Change to apply; returning an error aborts without writing
    ///
    /// # Returns
    /// - `Ok((Event, R))` - The updated event and the closure's result
    /// - `Err(AppError::NotFound)` - No such event in the guild
    pub async fn update<R>(
        &self,
        guild_id: u64,
        event_id: u64,
        update: impl FnOnce(&mut Event) -> Result<R, AppError>,
    ) -> Result<(Event, R), AppError> {
        self.modify(|events| {
            let event = events
                .iter_mut()
                .find(|e| e.id == event_id && e.guild_id == guild_id)
                .ok_or_else(|| not_found(event_id))?;

            let result = update(event)?;
            Ok((event.clone(), result))
        })
        .await
    }

    /// Removes one event of a guild.
    ///
    /// # Returns
    /// - `Ok(Event)` - The removed event
    /// - `Err(AppError::NotFound)` - No such event in the guild
    pub async fn delete(&self, guild_id: u64, event_id: u64) -> Result<Event, AppError> {
        self.modify(|events| {
            let index = events
                .iter()
                .position(|e| e.id == event_id && e.guild_id == guild_id)
                .ok_or_else(|| not_found(event_id))?;

            Ok(events.remove(index))
        })
        .await
    }

    /// Records a discussion thread for an occurrence unless one already exists.
    ///
    /// Recurring events record under `thread_info[date]`, one-off events under
    /// `thread_id`.
    ///
    /// # Arguments
    /// - `event_id` - Event the thread belongs to
    /// - `date` - Occurrence date the thread was opened for
    /// - `thread_id` - The new thread
    pub async fn record_thread(
        &self,
        event_id: u64,
        date: NaiveDate,
        thread_id: u64,
    ) -> Result<ThreadRecord, AppError> {
        self.modify(|events| {
            let Some(event) = events.iter_mut().find(|e| e.id == event_id) else {
                return Ok(ThreadRecord::EventGone);
            };

            let Some(schedule) = event.schedule() else {
                return Ok(ThreadRecord::EventGone);
            };

            if let Some(existing) = event.thread_for(date) {
                return Ok(ThreadRecord::AlreadyRecorded(existing));
            }

            if event.recurring {
                event.thread_info.insert(date, thread_id);
            } else if schedule.date == date {
                event.thread_id = Some(thread_id);
            } else {
                return Ok(ThreadRecord::EventGone);
            }

            Ok(ThreadRecord::Recorded)
        })
        .await
    }
}

/// Finds the single event a reference points at.
///
/// An id that matches no event is retried as a title, so events with numeric titles
/// can still be referenced.
pub fn resolve_in<'e>(
    events: &'e [Event],
    reference: &EventReference,
) -> Result<&'e Event, AppError> {
    match reference {
        EventReference::Id(id) => match events.iter().find(|e| e.id == *id) {
            Some(event) => Ok(event),
            None => resolve_title(events, &id.to_string()).map_err(|e| match e {
                AppError::NotFound(_) => not_found(*id),
                other => other,
            }),
        },
        EventReference::Title(title) => resolve_title(events, title),
    }
}

fn resolve_title<'e>(events: &'e [Event], title: &str) -> Result<&'e Event, AppError> {
    let matches: Vec<&Event> = events
        .iter()
        .filter(|e| e.title.eq_ignore_ascii_case(title))
        .collect();

    match matches.as_slice() {
        [] => Err(AppError::NotFound(format!(
            "No event called '{}' was found.",
            title
        ))),
        [event] => Ok(event),
        several => Err(ValidationError::AmbiguousTitle {
            title: title.to_string(),
            ids: several
                .iter()
                .map(|e| e.id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
        .into()),
    }
}

fn not_found(event_id: u64) -> AppError {
    AppError::NotFound(format!("No event with id {} was found.", event_id))
}

fn next_id(events: &[Event]) -> u64 {
    events.iter().map(|e| e.id).max().unwrap_or(0) + 1
}

/// Reads and decodes the event document of a locked store.
///
/// A document that is valid JSON but not a list is moved aside like an unparsable one
/// and reads as empty.
async fn load_events(guard: &DocumentGuard<'_>) -> Result<(Vec<Event>, bool), AppError> {
    match decode_events(guard.read().await?) {
        Ok(decoded) => Ok(decoded),
        Err(found) => {
            guard
                .set_aside(&format!("expected a list of events, found {}", found))
                .await;
            Ok((Vec::new(), false))
        }
    }
}

/// Decodes a stored event list.
///
/// # Returns
/// - `Ok((events, repaired))` - The decoded events in stored order, and whether anything
///   had to be repaired (so the next write persists the repair)
/// - `Err(&str)` - The document is not a list; names what was found instead
fn decode_events(document: Option<Value>) -> Result<(Vec<Event>, bool), &'static str> {
    let records = match document {
        None => return Ok((Vec::new(), false)),
        Some(Value::Array(records)) => records,
        Some(other) => return Err(json_kind(&other)),
    };

    let mut repaired = false;
    let mut events: Vec<Event> = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Event>(record) {
            Ok(mut event) => {
                for repair in event.repair() {
                    tracing::warn!("Repaired event record {} ({}): {:?}", index, event.title, repair);
                    repaired = true;
                }
                events.push(event);
            }
            Err(e) => {
                tracing::warn!("Skipping malformed event record {}: {}", index, e);
                repaired = true;
            }
        }
    }

    // Records written before ids existed, or colliding ids, get fresh ones.
    let mut seen = HashSet::new();
    let mut next = next_id(&events);
    for event in events.iter_mut() {
        if event.id == 0 || !seen.insert(event.id) {
            tracing::warn!("Assigning id {} to event '{}'", next, event.title);
            event.id = next;
            seen.insert(next);
            next += 1;
            repaired = true;
        }
    }

    Ok((events, repaired))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
