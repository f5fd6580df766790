//! Concrete occurrences of stored events.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::model::event::Event;

/// An event paired with one concrete date-time it happens at.
///
/// Borrowing the event keeps the stored record untouched while the view is rendered
/// or scheduled.
#[derive(Debug, Clone, Copy)]
pub struct OccurrenceView<'a> {
    pub event: &'a Event,
    pub display_date: DateTime<Tz>,
}

impl<'a> OccurrenceView<'a> {
    pub fn new(event: &'a Event, display_date: DateTime<Tz>) -> Self {
        Self {
            event,
            display_date,
        }
    }

    /// Local calendar date of the occurrence, used as the `thread_info` key.
    pub fn date(&self) -> NaiveDate {
        self.display_date.date_naive()
    }

    /// Thread recorded for this specific occurrence.
    pub fn thread_id(&self) -> Option<u64> {
        self.event.thread_for(self.date())
    }
}
