use serde_json::Value;

use crate::{context::TestContext, error::TestError, EVENTS_FILE, GUILD_DISPLAY_FILE};

/// Builder for creating test contexts with pre-seeded documents.
///
/// Provides a fluent interface for configuring the data directory before the store under
/// test opens it. Documents that are never configured are not written at all, which lets
/// tests cover the "missing file" path.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::{builder::TestBuilder, factory::event::EventJsonFactory};
///
/// let test = TestBuilder::new()
///     .with_event(EventJsonFactory::new(1).at("2025-10-24T19:00:00").recurring().build())
///     .with_guild_display(serde_json::json!({ "1": { "channel_id": 55 } }))
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// Event records to write as a JSON array, if any were added.
    events: Option<Vec<Value>>,

    /// Raw event file contents, taking precedence over `events`.
    raw_events: Option<String>,

    /// Guild display document to write, if configured.
    guild_display: Option<Value>,
}

impl TestBuilder {
    /// Creates a new test builder with no documents configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance
    pub fn new() -> Self {
        Self {
            events: None,
            raw_events: None,
            guild_display: None,
        }
    }

    /// Adds an event record to the seeded event list.
    ///
    /// Records are written in the order they were added. Calling this at least once
    /// guarantees the event document exists.
    ///
    /// # Arguments
    /// - `event` - JSON event record, typically from `EventJsonFactory`
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_event(mut self, event: Value) -> Self {
        self.events.get_or_insert_with(Vec::new).push(event);
        self
    }

    /// Seeds an empty event list document.
    pub fn with_empty_events(mut self) -> Self {
        self.events.get_or_insert_with(Vec::new);
        self
    }

    /// Writes the event document verbatim, for corrupt or hand-written files.
    ///
    /// # Arguments
    /// - `contents` - Raw file contents
    pub fn with_raw_events(mut self, contents: &str) -> Self {
        self.raw_events = Some(contents.to_string());
        self
    }

    /// Seeds the guild display document.
    ///
    /// # Arguments
    /// - `display` - JSON object keyed by guild id
    pub fn with_guild_display(mut self, display: Value) -> Self {
        self.guild_display = Some(display);
        self
    }

    /// Builds the test context and writes every configured document.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context whose data directory holds the seeded documents
    /// - `Err(TestError)` - Failed to create the directory or write a document
    pub async fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new()?;

        if let Some(raw) = self.raw_events {
            context.write_file(EVENTS_FILE, &raw)?;
        } else if let Some(events) = self.events {
            context.write_file(EVENTS_FILE, &serde_json::to_string_pretty(&events)?)?;
        }

        if let Some(display) = self.guild_display {
            context.write_file(GUILD_DISPLAY_FILE, &serde_json::to_string_pretty(&display)?)?;
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
