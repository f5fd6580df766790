//! Occurrence expansion for one-off and weekly recurring events.
//!
//! Anchors are stored as local wall-clock times. Every occurrence is built by stepping the
//! calendar **date** and recombining it with the unchanged time of day before localizing,
//! so a weekly series keeps its wall-clock time across daylight saving changes instead of
//! drifting by an hour.

use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::{
    config::CalendarSettings,
    model::{event::Event, occurrence::OccurrenceView},
};

const WEEK_DAYS: u64 = 7;

/// Localizes a wall-clock time.
///
/// Ambiguous times (clocks going back) resolve to the earlier instant. Times that do not
/// exist (clocks going forward) move forward by the size of the gap.
pub fn localize(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // Reading the time with the offset in force before the gap moves it forward
            // by exactly the gap's length.
            let before = tz
                .offset_from_utc_datetime(&(naive - Duration::days(1)))
                .fix()
                .local_minus_utc();
            tz.from_utc_datetime(&(naive - Duration::seconds(before as i64)))
        }
    }
}

/// Expands a weekly recurring anchor into the occurrences inside `(now, now + window]`.
///
/// # Arguments
/// - `anchor_date` - Date of the first occurrence; earlier dates are never emitted
/// - `time` - Wall-clock time of every occurrence
/// - `now` - Reference instant; only occurrences strictly after it are emitted
/// - `window` - Look-ahead length
/// - `tz` - Timezone the anchor is expressed in
///
/// # Returns
/// - Occurrences in ascending order; empty when none fall inside the window
pub fn expand_weekly(
    anchor_date: NaiveDate,
    time: NaiveTime,
    now: DateTime<Utc>,
    window: Duration,
    tz: &Tz,
) -> Vec<DateTime<Tz>> {
    let now_local = now.with_timezone(tz);
    let horizon = now + window;

    let target = anchor_date.weekday().num_days_from_monday() as i64;
    let today = now_local.weekday().num_days_from_monday() as i64;
    let offset = (target - today).rem_euclid(WEEK_DAYS as i64) as u64;

    let Some(mut date) = now_local
        .date_naive()
        .checked_add_days(Days::new(offset))
    else {
        return Vec::new();
    };

    if localize(tz, date.and_time(time)) <= now {
        let Some(next) = date.checked_add_days(Days::new(WEEK_DAYS)) else {
            return Vec::new();
        };
        date = next;
    }

    // The series starts at its anchor; skip whole weeks before it.
    while date < anchor_date {
        match date.checked_add_days(Days::new(WEEK_DAYS)) {
            Some(next) => date = next,
            None => return Vec::new(),
        }
    }

    let mut occurrences = Vec::new();
    loop {
        let occurrence = localize(tz, date.and_time(time));
        if occurrence > horizon {
            break;
        }
        if occurrence > now {
            occurrences.push(occurrence);
        }

        match date.checked_add_days(Days::new(WEEK_DAYS)) {
            Some(next) => date = next,
            None => break,
        }
    }

    occurrences
}

/// The single occurrence of a one-off anchor, if it is still in the future.
pub fn next_single_occurrence(
    date: NaiveDate,
    time: NaiveTime,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<DateTime<Tz>> {
    let occurrence = localize(tz, date.and_time(time));
    (occurrence > now).then_some(occurrence)
}

/// Concrete future occurrences of an event.
///
/// TBC events have none. Recurring events are expanded over `window`; one-off events
/// yield their anchor if it is still ahead of `now`, whatever the window.
pub fn occurrences_of(
    event: &Event,
    now: DateTime<Utc>,
    window: Duration,
    tz: &Tz,
) -> Vec<DateTime<Tz>> {
    let Some(schedule) = event.schedule() else {
        return Vec::new();
    };

    let time = event.time_of_day();
    if event.recurring {
        expand_weekly(schedule.date, time, now, window, tz)
    } else {
        next_single_occurrence(schedule.date, time, now, tz)
            .into_iter()
            .collect()
    }
}

/// Occurrence views of every dated event within the display look-ahead.
pub fn occurrence_views<'a>(
    events: &'a [Event],
    now: DateTime<Utc>,
    settings: &CalendarSettings,
) -> Vec<OccurrenceView<'a>> {
    let window = Duration::days(settings.lookahead_days);

    events
        .iter()
        .flat_map(|event| {
            occurrences_of(event, now, window, &settings.timezone)
                .into_iter()
                .map(move |date| OccurrenceView::new(event, date))
        })
        .collect()
}

/// Whether a calendar date is over, i.e. strictly before today in `tz`.
pub fn date_has_passed(date: NaiveDate, now: DateTime<Utc>, tz: &Tz) -> bool {
    date < now.with_timezone(tz).date_naive()
}
