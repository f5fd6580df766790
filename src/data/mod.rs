//! Persistence layer.
//!
//! The bot keeps two JSON documents in its data directory: the event list and the
//! per-guild display state. `DataStore` owns both documents; repositories borrow it and
//! expose typed operations, each running as one locked load/mutate/save cycle. No caller
//! keeps a decoded copy across an await point, so the documents stay the single source
//! of truth.

pub mod document;
pub mod event;
pub mod guild_display;

#[cfg(test)]
mod test;

use std::path::Path;
use tokio::sync::Mutex;

use crate::{data::document::JsonDocument, error::AppError};

pub const EVENTS_FILE: &str = "events.json";
pub const GUILD_DISPLAY_FILE: &str = "guild_display.json";

/// Handle to the bot's persisted documents.
pub struct DataStore {
    pub(crate) events: JsonDocument,
    pub(crate) guild_display: JsonDocument,
    /// Held for a whole summary refresh, from reading the display state until the posted
    /// message id is recorded, so two refreshes can never both post.
    pub(crate) display_refresh: Mutex<()>,
}

impl DataStore {
    /// Opens the store in `dir`, creating the directory if needed.
    ///
    /// Documents themselves are created lazily on first write.
    ///
    /// # Returns
    /// - `Ok(DataStore)` - Store ready for use
    /// - `Err(AppError::Io)` - The directory could not be created
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;

        Ok(Self {
            events: JsonDocument::new(dir.join(EVENTS_FILE)),
            guild_display: JsonDocument::new(dir.join(GUILD_DISPLAY_FILE)),
            display_refresh: Mutex::new(()),
        })
    }
}
