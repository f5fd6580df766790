use chrono_tz::Tz;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_TIMEZONE: &str = "Europe/London";
const DEFAULT_THREAD_LEAD_HOURS: i64 = 48;
const DEFAULT_LOOKAHEAD_DAYS: i64 = 14;
const DEFAULT_FIELD_CHARACTER_BUDGET: usize = 1000;
const DEFAULT_THREAD_SCHEDULE: &str = "0 0 * * * *";
const DEFAULT_CLEANUP_SCHEDULE: &str = "0 30 */12 * * *";

/// Hard limit Discord enforces on an embed field value.
pub const DISCORD_FIELD_LIMIT: usize = 1024;

/// Smallest per-field budget that still fits a typical occurrence block.
const MIN_FIELD_CHARACTER_BUDGET: usize = 100;

pub struct Config {
    pub discord_bot_token: String,
    pub data_dir: PathBuf,
    pub calendar: CalendarSettings,
    pub thread_schedule: String,
    pub cleanup_schedule: String,
}

/// Tunables of the recurring-event engine, shared by every service.
#[derive(Debug, Clone)]
pub struct CalendarSettings {
    /// Timezone anchors are entered and displayed in.
    pub timezone: Tz,
    /// Hours before an occurrence at which its discussion thread opens.
    pub thread_lead_hours: i64,
    /// How far ahead recurring events are expanded for display.
    pub lookahead_days: i64,
    /// Maximum characters packed into a single embed field.
    pub field_character_budget: usize,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Europe::London,
            thread_lead_hours: DEFAULT_THREAD_LEAD_HOURS,
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            field_character_budget: DEFAULT_FIELD_CHARACTER_BUDGET,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let timezone = optional_var("CALENDAR_TIMEZONE")
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone = Tz::from_str(&timezone).map_err(|e| ConfigError::InvalidEnvVar {
            name: "CALENDAR_TIMEZONE".to_string(),
            value: timezone.clone(),
            reason: e.to_string(),
        })?;

        let thread_lead_hours =
            parse_var("THREAD_LEAD_HOURS", DEFAULT_THREAD_LEAD_HOURS, |v: &i64| *v >= 1)?;
        let lookahead_days =
            parse_var("LOOKAHEAD_DAYS", DEFAULT_LOOKAHEAD_DAYS, |v: &i64| *v >= 1)?;
        let field_character_budget = parse_var(
            "FIELD_CHARACTER_BUDGET",
            DEFAULT_FIELD_CHARACTER_BUDGET,
            |v: &usize| (MIN_FIELD_CHARACTER_BUDGET..=DISCORD_FIELD_LIMIT).contains(v),
        )?;

        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            data_dir: optional_var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            calendar: CalendarSettings {
                timezone,
                thread_lead_hours,
                lookahead_days,
                field_character_budget,
            },
            thread_schedule: optional_var("THREAD_SCHEDULE")
                .unwrap_or_else(|| DEFAULT_THREAD_SCHEDULE.to_string()),
            cleanup_schedule: optional_var("CLEANUP_SCHEDULE")
                .unwrap_or_else(|| DEFAULT_CLEANUP_SCHEDULE.to_string()),
        })
    }
}

/// Reads a variable, treating empty values the same as unset ones.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an optional variable, falling back to `default` when unset.
///
/// # Arguments
/// - `name` - Environment variable name
/// - `default` - Value used when the variable is unset or empty
/// - `valid` - Range check applied to parsed values
fn parse_var<T>(name: &str, default: T, valid: impl Fn(&T) -> bool) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = optional_var(name) else {
        return Ok(default);
    };

    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: raw.clone(),
        reason,
    };

    let value = raw.trim().parse::<T>().map_err(|e| invalid(e.to_string()))?;
    if !valid(&value) {
        return Err(invalid("value out of range".to_string()));
    }

    Ok(value)
}
