//! Domain model for calendar events and the parameters used to create and edit them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum title length; also Discord's limit for thread names.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum description length, keeping a single occurrence block under a field's budget.
pub const MAX_DESCRIPTION_LENGTH: usize = 700;

fn default_true() -> bool {
    true
}

/// One persisted calendar event.
///
/// A recurring event repeats every 7 days from `anchor_datetime`, keeping the organiser's
/// wall-clock time. A non-recurring event happens once. Events without an anchor are
/// "TBC" and are only ever displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Stable identifier, unique within the store. Zero means "not yet assigned".
    #[serde(default, deserialize_with = "crate::util::lenient::id")]
    pub id: u64,
    /// Guild the event belongs to.
    #[serde(deserialize_with = "crate::util::lenient::id")]
    pub guild_id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// First (or only) occurrence as local wall-clock time; `None` means TBC.
    #[serde(default)]
    pub anchor_datetime: Option<NaiveDateTime>,
    /// Whether the anchor carries a meaningful time of day.
    #[serde(default)]
    pub has_time: bool,
    /// Organiser-entered hour, echoed verbatim when displaying.
    #[serde(default)]
    pub original_hour: u32,
    /// Organiser-entered minute, echoed verbatim when displaying.
    #[serde(default)]
    pub original_minute: u32,
    #[serde(default, deserialize_with = "crate::util::lenient::optional_id")]
    pub organiser_id: Option<u64>,
    #[serde(default, deserialize_with = "crate::util::lenient::optional_id")]
    pub squad_maker_id: Option<u64>,
    #[serde(default)]
    pub recurring: bool,
    /// Discussion thread of a non-recurring event.
    #[serde(default, deserialize_with = "crate::util::lenient::optional_id")]
    pub thread_id: Option<u64>,
    /// Discussion threads of a recurring event, keyed by occurrence date.
    #[serde(default, deserialize_with = "crate::util::lenient::null_as_default")]
    pub thread_info: BTreeMap<NaiveDate, u64>,
    /// Whether discussion threads are opened for this event.
    #[serde(default = "default_true")]
    pub create_threads: bool,
}

/// When an event happens: its anchor and whether the time of day is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchedule {
    pub date: NaiveDate,
    /// `None` for date-only events.
    pub time: Option<NaiveTime>,
}

impl EventSchedule {
    /// Anchor as a naive local date-time; date-only schedules use midnight.
    pub fn anchor(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }
}

/// Problems found (and repaired) when decoding a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRepair {
    /// A recurring record had no anchor and was made non-recurring.
    RecurringWithoutDate,
    /// A recurring record also carried a single `thread_id`, which was dropped.
    DroppedSingleThread(u64),
    /// A non-recurring record carried per-occurrence threads, which were dropped.
    DroppedOccurrenceThreads(Vec<u64>),
    /// The stored time of day disagreed with the organiser-entered fields.
    RestoredOriginalTime,
}

impl Event {
    /// Current schedule, or `None` for TBC events.
    pub fn schedule(&self) -> Option<EventSchedule> {
        let anchor = self.anchor_datetime?;
        Some(EventSchedule {
            date: anchor.date(),
            time: self.has_time.then(|| self.time_of_day()),
        })
    }

    /// Replaces the schedule, keeping the organiser-entered time in sync.
    pub fn set_schedule(&mut self, schedule: Option<EventSchedule>) {
        match schedule {
            Some(schedule) => {
                let time = schedule.time.unwrap_or(NaiveTime::MIN);
                self.anchor_datetime = Some(schedule.anchor());
                self.has_time = schedule.time.is_some();
                self.original_hour = time.hour();
                self.original_minute = time.minute();
            }
            None => {
                self.anchor_datetime = None;
                self.has_time = false;
                self.original_hour = 0;
                self.original_minute = 0;
            }
        }
    }

    pub fn is_tbc(&self) -> bool {
        self.anchor_datetime.is_none()
    }

    /// Time of day every occurrence happens at.
    ///
    /// Taken from the organiser-entered hour and minute so it never inherits rounding
    /// from a re-localized date-time. Date-only events happen at midnight.
    pub fn time_of_day(&self) -> NaiveTime {
        if !self.has_time {
            return NaiveTime::MIN;
        }

        NaiveTime::from_hms_opt(self.original_hour, self.original_minute, 0)
            .or_else(|| self.anchor_datetime.map(|anchor| anchor.time()))
            .unwrap_or(NaiveTime::MIN)
    }

    /// Thread recorded for the occurrence on `date`, if any.
    pub fn thread_for(&self, date: NaiveDate) -> Option<u64> {
        if self.recurring {
            self.thread_info.get(&date).copied()
        } else {
            self.thread_id
        }
    }

    /// Every thread currently recorded on the event.
    pub fn recorded_threads(&self) -> Vec<u64> {
        self.thread_id
            .into_iter()
            .chain(self.thread_info.values().copied())
            .collect()
    }

    /// Switches between recurring and one-off, returning threads that no longer apply.
    ///
    /// A thread of a one-off event is meaningless for a weekly series and vice versa, so
    /// the field that does not match the new mode is cleared.
    pub fn set_recurring(&mut self, recurring: bool) -> Vec<u64> {
        if self.recurring == recurring {
            return Vec::new();
        }

        self.recurring = recurring;
        if recurring {
            self.thread_id.take().into_iter().collect()
        } else {
            std::mem::take(&mut self.thread_info).into_values().collect()
        }
    }

    /// Repairs invariant violations in a freshly decoded record.
    ///
    /// # Returns
    /// - Every repair that was applied, empty when the record was already consistent
    pub fn repair(&mut self) -> Vec<EventRepair> {
        let mut repairs = Vec::new();

        if self.recurring && self.anchor_datetime.is_none() {
            self.recurring = false;
            repairs.push(EventRepair::RecurringWithoutDate);
        }

        if self.recurring {
            if let Some(thread_id) = self.thread_id.take() {
                repairs.push(EventRepair::DroppedSingleThread(thread_id));
            }
        } else if !self.thread_info.is_empty() {
            let dropped = std::mem::take(&mut self.thread_info).into_values().collect();
            repairs.push(EventRepair::DroppedOccurrenceThreads(dropped));
        }

        if let Some(anchor) = self.anchor_datetime {
            let time = self.time_of_day();
            if anchor.time() != time {
                self.anchor_datetime = Some(anchor.date().and_time(time));
                repairs.push(EventRepair::RestoredOriginalTime);
            }
        }

        repairs
    }
}

/// Validated parameters for creating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventParam {
    pub guild_id: u64,
    pub title: String,
    pub description: Option<String>,
    pub schedule: Option<EventSchedule>,
    pub organiser_id: Option<u64>,
    pub squad_maker_id: Option<u64>,
    pub recurring: bool,
}

/// Changes to apply to an existing event.
///
/// Outer `None` leaves a field untouched; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateEventParam {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub date: Option<Option<NaiveDate>>,
    /// New time of day; applied to the new date if one is given, otherwise the current one.
    pub time: Option<NaiveTime>,
    pub organiser_id: Option<Option<u64>>,
    pub squad_maker_id: Option<Option<u64>>,
    pub recurring: Option<bool>,
}

impl UpdateEventParam {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.organiser_id.is_none()
            && self.squad_maker_id.is_none()
            && self.recurring.is_none()
    }
}

/// How a command refers to an event: by id, or by exact title within the guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventReference {
    Id(u64),
    Title(String),
}

impl EventReference {
    /// Interprets user input: all digits (optionally prefixed with `#`) is an id.
    ///
    /// Resolution falls back to a title match when no event has that id.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        match digits.parse::<u64>() {
            Ok(id) if !digits.is_empty() => Self::Id(id),
            _ => Self::Title(trimmed.to_string()),
        }
    }
}
