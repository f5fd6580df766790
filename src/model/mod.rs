//! Domain models and parameter types.
//!
//! Models are plain data shared by the store, the services and the bot adapters.
//! Persisted models derive serde traits and are decoded leniently at the store boundary.

pub mod display;
pub mod event;
pub mod guild_display;
pub mod occurrence;
