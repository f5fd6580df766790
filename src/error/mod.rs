//! Error types for the calendar bot.
//!
//! `AppError` is the top-level error returned by services and repositories. It wraps the
//! domain-specific errors so callers can use `?` throughout, and its `Display` output is
//! the human-readable reason shown to users when a command fails.

pub mod config;
pub mod discord;
pub mod internal;
pub mod validation;

use thiserror::Error;

use crate::error::{
    config::ConfigError, discord::DiscordError, internal::InternalError,
    validation::ValidationError,
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most variants
/// use `#[from]` for automatic error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// User input rejected before any state was changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Classified Discord API failure from the gateway abstraction.
    #[error(transparent)]
    Gateway(#[from] DiscordError),

    /// Discord client error from Serenity outside the gateway abstraction.
    ///
    /// Boxed due to large size. Occurs when building or starting the bot client.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Reading or writing a persisted document failed.
    ///
    /// Fatal for the operation in progress; the document on disk is left unchanged.
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted document could not be encoded.
    #[error("Storage encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Internal issue indicating a bug rather than bad input.
    #[error(transparent)]
    InternalError(#[from] InternalError),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Whether the error was caused by the user's input rather than by the bot.
    ///
    /// User errors are reported back as-is; anything else gets a generic reply and is
    /// logged in full.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}
