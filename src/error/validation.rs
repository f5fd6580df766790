use thiserror::Error;

/// User input rejected before any state is touched.
///
/// The `Display` text of each variant is shown to the user verbatim as the reason the
/// operation failed, so keep the messages short and actionable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The event title cannot be empty.")]
    EmptyTitle,

    #[error("The event title can be at most {max} characters long.")]
    TitleTooLong { max: usize },

    #[error("The description can be at most {max} characters long.")]
    DescriptionTooLong { max: usize },

    /// Date did not match any accepted format.
    #[error("'{0}' is not a valid date. Use DD/MM/YYYY (or YYYY-MM-DD), or 'tbc'.")]
    InvalidDate(String),

    /// Time did not match `HH:MM`.
    #[error("'{0}' is not a valid time. Use 24 hour HH:MM, for example 19:30.")]
    InvalidTime(String),

    #[error("A time was given without a date. Add a date or leave the time empty.")]
    TimeWithoutDate,

    /// Recurring events repeat weekly from their first date and cannot be TBC.
    #[error("Recurring events need a date for their first occurrence.")]
    RecurringWithoutDate,

    #[error("Nothing to change. Pass at least one option to edit.")]
    NoChanges,

    /// Title reference matched more than one event in the guild.
    #[error("More than one event is called '{title}'. Use one of these ids instead: {ids}.")]
    AmbiguousTitle { title: String, ids: String },
}
