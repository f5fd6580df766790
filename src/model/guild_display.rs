//! Domain model for per-guild display state.

use serde::{Deserialize, Serialize};

/// Where a guild's calendar lives and which message currently shows it.
///
/// `message_id` decides between editing the existing summary and posting a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildDisplay {
    /// Channel the calendar summary is posted in.
    #[serde(default, deserialize_with = "crate::util::lenient::optional_id")]
    pub channel_id: Option<u64>,
    /// Last summary message posted in `channel_id`.
    #[serde(default, deserialize_with = "crate::util::lenient::optional_id")]
    pub message_id: Option<u64>,
    /// Channel discussion threads are opened in.
    #[serde(default, deserialize_with = "crate::util::lenient::optional_id")]
    pub thread_channel_id: Option<u64>,
}
