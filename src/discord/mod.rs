//! Boundary to the Discord API.
//!
//! Services talk to Discord only through `DiscordGateway`, which exposes the handful of
//! calls the calendar needs and reports failures as classified `DiscordError`s. The
//! production implementation wraps serenity's HTTP client; tests use a recording mock.

pub mod http;

#[cfg(test)]
pub mod mock;

use serenity::async_trait;

use crate::{error::discord::DiscordError, model::display::CalendarMessage};

#[async_trait]
pub trait DiscordGateway: Send + Sync {
    /// Posts a message, returning its id.
    async fn send_message(
        &self,
        channel_id: u64,
        message: &CalendarMessage,
    ) -> Result<u64, DiscordError>;

    /// Replaces the content and embeds of an existing message.
    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: &CalendarMessage,
    ) -> Result<(), DiscordError>;

    /// Opens a public thread in a text channel, returning the thread's id.
    async fn create_thread(&self, channel_id: u64, name: &str) -> Result<u64, DiscordError>;

    /// Archives and locks a thread.
    async fn archive_thread(&self, thread_id: u64) -> Result<(), DiscordError>;

    /// Text channels of a guild, ordered by their position in the channel list.
    async fn text_channels(&self, guild_id: u64) -> Result<Vec<u64>, DiscordError>;
}
