use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory::event::EventJsonFactory};

use crate::{
    data::{
        event::{EventRepository, ThreadRecord},
        DataStore,
    },
    error::{validation::ValidationError, AppError},
    model::event::{CreateEventParam, EventReference, EventSchedule},
};

mod create;
mod delete;
mod get_all;
mod record_thread;
mod update;

const GUILD_ID: u64 = 1000;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_param(title: &str) -> CreateEventParam {
    CreateEventParam {
        guild_id: GUILD_ID,
        title: title.to_string(),
        description: None,
        schedule: Some(EventSchedule {
            date: date(2025, 10, 24),
            time: NaiveTime::from_hms_opt(19, 0, 0),
        }),
        organiser_id: Some(42),
        squad_maker_id: None,
        recurring: false,
    }
}
