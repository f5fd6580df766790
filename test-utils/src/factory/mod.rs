//! Factory methods for creating test data.
//!
//! This module provides factories for raw JSON records as the bot persists them. Working at
//! the JSON level (rather than with the bot's typed models) lets tests seed legacy or
//! malformed records and check what the decode step makes of them.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory::event::EventJsonFactory;
//!
//! // One-off dated event with a thread
//! let event = EventJsonFactory::new(guild_id)
//!     .title("Fleet op")
//!     .at("2025-10-24T19:00:00")
//!     .thread(4242)
//!     .build();
//!
//! // Weekly event with a thread for one occurrence
//! let weekly = EventJsonFactory::new(guild_id)
//!     .at("2025-10-03T19:00:00")
//!     .recurring()
//!     .occurrence_thread("2025-10-24", 777)
//!     .build();
//! ```
//!
//! # Available Factories
//!
//! - `event` - Create event records
//! - `guild_display` - Create guild display state entries

pub mod event;
pub mod guild_display;
pub mod helpers;
