use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::{error::TestError, EVENTS_FILE, GUILD_DISPLAY_FILE};

/// Test context owning a temporary data directory.
///
/// Provides an isolated directory for the bot's JSON documents. The directory and
/// everything in it is removed when the context is dropped, so keep the context alive
/// for the duration of the test.
pub struct TestContext {
    /// Temporary directory holding the seeded documents.
    dir: TempDir,
}

impl TestContext {
    /// Creates a new test context with an empty temporary directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with a fresh directory
    /// - `Err(TestError::Io)` - Failed to create the temporary directory
    pub fn new() -> Result<Self, TestError> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Path of the data directory to hand to the store under test.
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the event list document.
    pub fn events_path(&self) -> PathBuf {
        self.dir.path().join(EVENTS_FILE)
    }

    /// Path of the guild display document.
    pub fn guild_display_path(&self) -> PathBuf {
        self.dir.path().join(GUILD_DISPLAY_FILE)
    }

    /// Writes raw contents to a file in the data directory.
    ///
    /// Used by the builder for seeding, and by tests that need to inject malformed
    /// documents after the store has been opened.
    ///
    /// # Arguments
    /// - `name` - File name relative to the data directory
    /// - `contents` - Raw file contents
    pub fn write_file(&self, name: &str, contents: &str) -> Result<(), TestError> {
        std::fs::write(self.dir.path().join(name), contents)?;
        Ok(())
    }

    /// Reads and parses the event list document as written by the code under test.
    ///
    /// # Returns
    /// - `Ok(Value)` - Parsed JSON document
    /// - `Err(TestError)` - File missing or not valid JSON
    pub fn read_events_json(&self) -> Result<Value, TestError> {
        let raw = std::fs::read_to_string(self.events_path())?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Reads and parses the guild display document as written by the code under test.
    pub fn read_guild_display_json(&self) -> Result<Value, TestError> {
        let raw = std::fs::read_to_string(self.guild_display_path())?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Whether a file with the given name exists in the data directory.
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }
}
