//! Cron jobs driving the calendar: the thread pass and the cleanup sweep.

pub mod calendar;
