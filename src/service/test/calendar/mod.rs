use super::*;

use chrono::{NaiveDate, NaiveTime};

use crate::{
    error::validation::ValidationError,
    model::event::{CreateEventParam, EventReference, EventSchedule, UpdateEventParam},
    service::calendar::{display::DisplayOutcome, render::EMPTY_CALENDAR_HEADER, CalendarService},
};

mod add_event;
mod edit_event;
mod set_channel;

fn create_param(title: &str) -> CreateEventParam {
    CreateEventParam {
        guild_id: GUILD_ID,
        title: title.to_string(),
        description: None,
        schedule: Some(EventSchedule {
            date: NaiveDate::from_ymd_opt(2025, 10, 24).unwrap(),
            time: NaiveTime::from_hms_opt(19, 0, 0),
        }),
        organiser_id: Some(42),
        squad_maker_id: None,
        recurring: false,
    }
}
