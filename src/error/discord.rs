use serenity::http::HttpError;
use thiserror::Error;

/// Outcome of a failed call to the Discord API.
///
/// Calls are classified into the cases callers branch on instead of inspecting raw
/// HTTP errors. Every variant is safe to retry on the next scheduled pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscordError {
    /// Channel, thread or message no longer exists (HTTP 404).
    #[error("Discord resource not found")]
    NotFound,

    /// The bot lacks permission for the operation (HTTP 403).
    #[error("Missing permissions for Discord operation")]
    Forbidden,

    /// Discord asked us to slow down (HTTP 429).
    #[error("Rate limited by Discord")]
    RateLimited,

    /// Any other transport or API failure.
    #[error("Discord request failed: {0}")]
    Request(String),
}

impl DiscordError {
    /// Whether retrying the same call later can never succeed.
    ///
    /// Missing resources and missing permissions are treated as final so callers can
    /// forget references that will never resolve.
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::NotFound | Self::Forbidden)
    }
}

/// Classifies a serenity error by the HTTP status Discord answered with.
impl From<serenity::Error> for DiscordError {
    fn from(err: serenity::Error) -> Self {
        if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = &err {
            match response.status_code.as_u16() {
                404 => return Self::NotFound,
                403 => return Self::Forbidden,
                429 => return Self::RateLimited,
                _ => {}
            }
        }

        Self::Request(err.to_string())
    }
}
