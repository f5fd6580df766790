//! Event Calendar Test Utils
//!
//! Provides shared testing utilities for the event calendar bot. This crate offers a builder
//! pattern for creating test contexts backed by a temporary data directory, pre-seeded with
//! the JSON documents the bot persists.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for seeding the data directory
//! - **TestContext**: Test environment owning the temporary directory
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory::event::EventJsonFactory};
//!
//! #[tokio::test]
//! async fn test_store_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_event(EventJsonFactory::new(1).title("Raid night").build())
//!         .build()
//!         .await?;
//!
//!     let dir = test.data_dir();
//!     // Open the store against `dir`...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;

/// File name of the persisted event list inside the data directory.
pub const EVENTS_FILE: &str = "events.json";

/// File name of the persisted per-guild display state inside the data directory.
pub const GUILD_DISPLAY_FILE: &str = "guild_display.json";
