pub mod calendar;
pub mod cleanup;
pub mod occurrence;
pub mod thread;
