use chrono::{NaiveDate, NaiveTime};

use crate::error::validation::ValidationError;

/// Date formats accepted from users, tried in order.
const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%d.%m.%Y"];

/// Parsed value of a date option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    /// The date is explicitly "to be confirmed".
    Tbc,
    Date(NaiveDate),
}

/// Parses a user-entered date.
///
/// Accepts `DD/MM/YYYY`, `DD-MM-YYYY`, `DD.MM.YYYY` and `YYYY-MM-DD`, plus `tbc` (any case)
/// for events without a confirmed date.
///
/// # Returns
/// - `Ok(DateInput)` - Parsed date or TBC marker
/// - `Err(ValidationError::InvalidDate)` - No format matched
pub fn parse_date_input(value: &str) -> Result<DateInput, ValidationError> {
    let trimmed = value.trim();

    if trimmed.eq_ignore_ascii_case("tbc") {
        return Ok(DateInput::Tbc);
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(DateInput::Date)
        .ok_or_else(|| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Parses a user-entered 24 hour time in `HH:MM` (or `HH.MM`) form.
///
/// # Returns
/// - `Ok(NaiveTime)` - Time with zero seconds
/// - `Err(ValidationError::InvalidTime)` - Not a valid time of day
pub fn parse_time(value: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = value.trim();

    ["%H:%M", "%H.%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ValidationError::InvalidTime(trimmed.to_string()))
}
