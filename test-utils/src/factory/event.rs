//! Factory for raw event records.

use serde_json::{json, Map, Value};

use super::helpers::next_id;

/// Builder for a single persisted event record.
///
/// Defaults to a non-recurring TBC event with a unique id, `create_threads = true` and no
/// threads. Call the setters to shape the record, then `build()` for the JSON value.
pub struct EventJsonFactory {
    id: Option<u64>,
    guild_id: u64,
    title: String,
    description: Option<String>,
    anchor_datetime: Option<String>,
    has_time: bool,
    original_hour: u32,
    original_minute: u32,
    organiser_id: Option<u64>,
    squad_maker_id: Option<u64>,
    recurring: bool,
    thread_id: Option<u64>,
    thread_info: Map<String, Value>,
    create_threads: bool,
}

impl EventJsonFactory {
    /// Creates a factory for an event in the given guild.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the event belongs to
    pub fn new(guild_id: u64) -> Self {
        let id = next_id();
        Self {
            id: Some(id),
            guild_id,
            title: format!("Event {}", id),
            description: None,
            anchor_datetime: None,
            has_time: false,
            original_hour: 0,
            original_minute: 0,
            organiser_id: None,
            squad_maker_id: None,
            recurring: false,
            thread_id: None,
            thread_info: Map::new(),
            create_threads: true,
        }
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Omits the `id` key, as records written before ids existed.
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets a timed anchor from an ISO local date-time such as `2025-10-24T19:00:00`.
    ///
    /// The organiser-entered hour and minute are taken from the string.
    pub fn at(mut self, datetime: &str) -> Self {
        self.original_hour = datetime.get(11..13).and_then(|h| h.parse().ok()).unwrap_or(0);
        self.original_minute = datetime.get(14..16).and_then(|m| m.parse().ok()).unwrap_or(0);
        self.anchor_datetime = Some(datetime.to_string());
        self.has_time = true;
        self
    }

    /// Sets a date-only anchor such as `2025-10-24`.
    pub fn on_date(mut self, date: &str) -> Self {
        self.anchor_datetime = Some(format!("{}T00:00:00", date));
        self.has_time = false;
        self.original_hour = 0;
        self.original_minute = 0;
        self
    }

    pub fn recurring(mut self) -> Self {
        self.recurring = true;
        self
    }

    pub fn organiser(mut self, user_id: u64) -> Self {
        self.organiser_id = Some(user_id);
        self
    }

    pub fn squad_maker(mut self, user_id: u64) -> Self {
        self.squad_maker_id = Some(user_id);
        self
    }

    /// Records the single thread of a non-recurring event.
    pub fn thread(mut self, thread_id: u64) -> Self {
        self.thread_id = Some(thread_id);
        self
    }

    /// Records a per-occurrence thread keyed by `YYYY-MM-DD`.
    pub fn occurrence_thread(mut self, date: &str, thread_id: u64) -> Self {
        self.thread_info.insert(date.to_string(), json!(thread_id));
        self
    }

    pub fn create_threads(mut self, create_threads: bool) -> Self {
        self.create_threads = create_threads;
        self
    }

    /// Builds the JSON record.
    pub fn build(self) -> Value {
        let mut record = json!({
            "guild_id": self.guild_id,
            "title": self.title,
            "description": self.description,
            "anchor_datetime": self.anchor_datetime,
            "has_time": self.has_time,
            "original_hour": self.original_hour,
            "original_minute": self.original_minute,
            "organiser_id": self.organiser_id,
            "squad_maker_id": self.squad_maker_id,
            "recurring": self.recurring,
            "thread_id": self.thread_id,
            "thread_info": self.thread_info,
            "create_threads": self.create_threads,
        });

        if let (Some(id), Some(object)) = (self.id, record.as_object_mut()) {
            object.insert("id".to_string(), json!(id));
        }

        record
    }
}
