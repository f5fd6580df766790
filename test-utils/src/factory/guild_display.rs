//! Factory for guild display state entries.

use serde_json::{json, Map, Value};

/// Builds a guild display document from `(guild_id, entry)` pairs.
///
/// # Arguments
/// - `entries` - Guild ids and their display entries from `display_entry`
///
/// # Returns
/// - `Value` - JSON object keyed by guild id
pub fn guild_display_document(entries: Vec<(u64, Value)>) -> Value {
    let map: Map<String, Value> = entries
        .into_iter()
        .map(|(guild_id, entry)| (guild_id.to_string(), entry))
        .collect();

    Value::Object(map)
}

/// Builds one display entry.
///
/// # Arguments
/// - `channel_id` - Channel holding the calendar summary
/// - `message_id` - Last posted summary message, if any
/// - `thread_channel_id` - Channel threads are opened in, if configured
pub fn display_entry(
    channel_id: Option<u64>,
    message_id: Option<u64>,
    thread_channel_id: Option<u64>,
) -> Value {
    json!({
        "channel_id": channel_id,
        "message_id": message_id,
        "thread_channel_id": thread_channel_id,
    })
}
