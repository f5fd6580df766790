//! Guild display state repository.
//!
//! Tracks, per guild, which channel shows the calendar, which message currently holds the
//! rendered summary and where discussion threads are opened.

use dioxus_logger::tracing;
use std::collections::BTreeMap;

use crate::{
    data::{document::DocumentGuard, DataStore},
    error::AppError,
    model::guild_display::GuildDisplay,
};

type DisplayMap = BTreeMap<u64, GuildDisplay>;

/// Repository providing operations on the guild display document.
pub struct GuildDisplayRepository<'a> {
    store: &'a DataStore,
}

impl<'a> GuildDisplayRepository<'a> {
    /// Creates a new GuildDisplayRepository instance.
    ///
    /// # Arguments
    /// - `store` - Reference to the data store
    pub fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    /// Gets the display state of a guild, or the empty default if none was stored.
    pub async fn get(&self, guild_id: u64) -> Result<GuildDisplay, AppError> {
        Ok(self.get_all().await?.remove(&guild_id).unwrap_or_default())
    }

    /// Gets the display state of every guild.
    pub async fn get_all(&self) -> Result<DisplayMap, AppError> {
        let guard = self.store.guild_display.lock().await;
        load_displays(&guard).await
    }

    /// Applies a change to a guild's display state and persists it.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to update; a default entry is created if missing
    /// - `update` - Change to apply
    ///
    /// # Returns
    /// - `Ok(GuildDisplay)` - The state after the change
    /// - `Err(AppError)` - Read/write failure
    pub async fn update(
        &self,
        guild_id: u64,
        update: impl FnOnce(&mut GuildDisplay),
    ) -> Result<GuildDisplay, AppError> {
        let guard = self.store.guild_display.lock().await;
        let mut displays = load_displays(&guard).await?;

        let entry = displays.entry(guild_id).or_default();
        let before = entry.clone();
        update(entry);
        let after = entry.clone();

        if after != before {
            guard.write(&displays).await?;
        }

        Ok(after)
    }

    /// Records the message now holding a guild's summary.
    ///
    /// Only applies if the display channel is still `channel_id`; the channel may have
    /// been moved while the message was being posted.
    pub async fn set_message(
        &self,
        guild_id: u64,
        channel_id: u64,
        message_id: Option<u64>,
    ) -> Result<GuildDisplay, AppError> {
        self.update(guild_id, |display| {
            if display.channel_id == Some(channel_id) {
                display.message_id = message_id;
            }
        })
        .await
    }
}

/// Reads and decodes the display document of a locked store.
///
/// A document that is valid JSON but not a map of display entries is moved aside like an
/// unparsable one and reads as empty.
async fn load_displays(guard: &DocumentGuard<'_>) -> Result<DisplayMap, AppError> {
    let Some(document) = guard.read().await? else {
        return Ok(DisplayMap::new());
    };

    match serde_json::from_value::<BTreeMap<String, GuildDisplay>>(document) {
        Ok(raw) => Ok(raw
            .into_iter()
            .filter_map(|(guild_id, display)| match guild_id.parse::<u64>() {
                Ok(id) => Some((id, display)),
                Err(_) => {
                    tracing::warn!("Ignoring display state for invalid guild id '{}'", guild_id);
                    None
                }
            })
            .collect()),
        Err(e) => {
            guard
                .set_aside(&format!("malformed guild display map: {}", e))
                .await;
            Ok(DisplayMap::new())
        }
    }
}
