//! Discord bot surface of the calendar.
//!
//! The bot registers the `/event` and `/calendar` slash commands once connected and
//! answers them with ephemeral replies. Calendar changes made through commands are
//! published by refreshing the guild's summary message in the background.
//!
//! # Gateway Intents
//!
//! Only `GUILDS` is requested. Slash commands are delivered as interactions, so the
//! bot needs no privileged intents and never reads message content.

pub mod command;
pub mod handler;
pub mod start;
