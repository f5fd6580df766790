//! Publishing the rendered calendar summary.
//!
//! Each guild has at most one summary message. Refreshing edits it in place; when it was
//! deleted (or never posted) a new one is posted and its id recorded.

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;

use crate::{
    data::{event::EventRepository, guild_display::GuildDisplayRepository},
    error::{discord::DiscordError, AppError},
    service::calendar::{
        render::{build_calendar_message, render_calendar},
        CalendarService,
    },
};

/// What a refresh did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOutcome {
    /// The guild has no summary channel configured.
    NoChannel,
    /// The existing summary message was updated.
    Edited(u64),
    /// A new summary message was posted.
    Posted(u64),
}

impl<'a> CalendarService<'a> {
    /// Re-renders a guild's calendar and publishes it in the summary channel.
    ///
    /// Refreshes are serialized, so a refresh that starts while another is posting sees
    /// the recorded message and edits it.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to refresh
    /// - `now` - Reference instant for the rendered occurrences
    ///
    /// # Returns
    /// - `Ok(DisplayOutcome)` - What was done
    /// - `Err(AppError::Gateway)` - Discord rejected the edit or post
    /// - `Err(AppError)` - Storage failure
    pub async fn refresh_display(
        &self,
        guild_id: u64,
        now: DateTime<Utc>,
    ) -> Result<DisplayOutcome, AppError> {
        let _refresh = self.store.display_refresh.lock().await;

        let display_repo = GuildDisplayRepository::new(self.store);
        let display = display_repo.get(guild_id).await?;

        let Some(channel_id) = display.channel_id else {
            tracing::debug!("Guild {} has no calendar channel, skipping refresh", guild_id);
            return Ok(DisplayOutcome::NoChannel);
        };

        let events = EventRepository::new(self.store).get_by_guild(guild_id).await?;
        let fields = render_calendar(&events, now, self.settings);
        let message = build_calendar_message(fields, now);

        if let Some(message_id) = display.message_id {
            match self
                .gateway
                .edit_message(channel_id, message_id, &message)
                .await
            {
                Ok(()) => {
                    tracing::debug!(
                        "Edited calendar message {} in channel {}",
                        message_id,
                        channel_id
                    );
                    return Ok(DisplayOutcome::Edited(message_id));
                }
                Err(DiscordError::NotFound) => {
                    tracing::warn!(
                        "Calendar message {} in channel {} is gone, posting a new one",
                        message_id,
                        channel_id
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        let message_id = self.gateway.send_message(channel_id, &message).await?;
        display_repo
            .set_message(guild_id, channel_id, Some(message_id))
            .await?;

        tracing::info!(
            "Posted calendar message {} in channel {} for guild {}",
            message_id,
            channel_id,
            guild_id
        );

        Ok(DisplayOutcome::Posted(message_id))
    }

    /// Refreshes several guilds, logging failures instead of returning them.
    pub async fn refresh_guilds(
        &self,
        guild_ids: impl IntoIterator<Item = u64>,
        now: DateTime<Utc>,
    ) {
        for guild_id in guild_ids {
            if let Err(e) = self.refresh_display(guild_id, now).await {
                tracing::error!("Failed to refresh calendar for guild {}: {}", guild_id, e);
            }
        }
    }
}
