//! Removal of past events and stale occurrence threads.
//!
//! One-off events whose date is over are removed together with their thread; weekly
//! events keep running but lose the threads of past occurrences. Threads are archived
//! before the store is touched, and the store only forgets a thread once Discord confirmed
//! it is archived or can never be reached again. Everything else stays for the next sweep.

use chrono::{DateTime, NaiveDate, Utc};
use dioxus_logger::tracing;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::{
    config::CalendarSettings,
    data::{event::EventRepository, DataStore},
    discord::DiscordGateway,
    error::AppError,
    model::event::Event,
    service::{calendar::CalendarService, occurrence::date_has_passed},
};

/// Outcome counts of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// One-off events removed from the store.
    pub removed_events: usize,
    /// Past occurrence threads dropped from weekly events.
    pub pruned_threads: usize,
    /// Expired items kept because archiving their thread failed for now.
    pub retained: usize,
}

/// A thread of a past occurrence of a weekly event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StaleThread {
    event_id: u64,
    date: NaiveDate,
    thread_id: u64,
}

/// Work found in one snapshot of the store.
#[derive(Debug, Default)]
struct SweepPlan {
    /// `(event_id, thread_id)` of one-off events that are over.
    expired_events: Vec<(u64, Option<u64>)>,
    stale_threads: Vec<StaleThread>,
}

impl SweepPlan {
    fn is_empty(&self) -> bool {
        self.expired_events.is_empty() && self.stale_threads.is_empty()
    }
}

/// Service sweeping expired calendar state.
pub struct CleanupService<'a> {
    store: &'a DataStore,
    gateway: Arc<dyn DiscordGateway>,
    settings: &'a CalendarSettings,
}

impl<'a> CleanupService<'a> {
    /// Creates a new CleanupService instance.
    ///
    /// # Arguments
    /// - `store` - Reference to the data store
    /// - `gateway` - Discord API gateway
    /// - `settings` - Calendar settings providing the timezone
    pub fn new(
        store: &'a DataStore,
        gateway: Arc<dyn DiscordGateway>,
        settings: &'a CalendarSettings,
    ) -> Self {
        Self {
            store,
            gateway,
            settings,
        }
    }

    /// Runs one sweep.
    ///
    /// A date counts as over once it is before today in the configured timezone. When the
    /// store changed, the summary of every guild with remaining or removed events is
    /// refreshed.
    ///
    /// # Arguments
    /// - `now` - Reference instant
    ///
    /// # Returns
    /// - `Ok(CleanupReport)` - What was removed and what was kept for retry
    /// - `Err(AppError)` - The store could not be read or written
    pub async fn run(&self, now: DateTime<Utc>) -> Result<CleanupReport, AppError> {
        let repo = EventRepository::new(self.store);
        let events = repo.get_all().await?;

        let plan = plan_sweep(&events, now, self.settings);
        if plan.is_empty() {
            tracing::debug!("Cleanup found nothing to remove");
            return Ok(CleanupReport::default());
        }

        let mut report = CleanupReport::default();

        let mut done_events = HashSet::new();
        for (event_id, thread_id) in &plan.expired_events {
            let archived = match thread_id {
                Some(thread_id) => self.archive(*thread_id).await,
                None => true,
            };
            if archived {
                done_events.insert(*event_id);
            } else {
                report.retained += 1;
            }
        }

        let mut done_threads = HashSet::new();
        for stale in &plan.stale_threads {
            if self.archive(stale.thread_id).await {
                done_threads.insert(*stale);
            } else {
                report.retained += 1;
            }
        }

        if done_events.is_empty() && done_threads.is_empty() {
            tracing::info!(
                "Cleanup kept {} item(s) for retry, nothing removed",
                report.retained
            );
            return Ok(report);
        }

        let tz = self.settings.timezone;
        let (removed, pruned, guilds) = repo
            .modify(|events| {
                let mut removed = Vec::new();
                events.retain(|event| {
                    // The event may have been edited since the snapshot.
                    let still_expired = !event.recurring
                        && event
                            .schedule()
                            .is_some_and(|schedule| date_has_passed(schedule.date, now, &tz));
                    if done_events.contains(&event.id) && still_expired {
                        removed.push(event.clone());
                        false
                    } else {
                        true
                    }
                });

                let mut pruned = 0;
                for stale in &done_threads {
                    let Some(event) = events.iter_mut().find(|e| e.id == stale.event_id) else {
                        continue;
                    };
                    if event.thread_info.get(&stale.date) == Some(&stale.thread_id) {
                        event.thread_info.remove(&stale.date);
                        pruned += 1;
                    }
                }

                let guilds: BTreeSet<u64> = events
                    .iter()
                    .chain(removed.iter())
                    .map(|event| event.guild_id)
                    .collect();

                Ok((removed, pruned, guilds))
            })
            .await?;

        for event in &removed {
            tracing::info!(
                "Removed past event {} '{}' from guild {}",
                event.id,
                event.title,
                event.guild_id
            );
        }

        report.removed_events = removed.len();
        report.pruned_threads = pruned;

        if report.removed_events > 0 || report.pruned_threads > 0 {
            CalendarService::new(self.store, self.gateway.clone(), self.settings)
                .refresh_guilds(guilds, now)
                .await;
        }

        tracing::info!(
            "Cleanup finished: {} event(s) removed, {} thread(s) pruned, {} kept for retry",
            report.removed_events,
            report.pruned_threads,
            report.retained
        );

        Ok(report)
    }

    /// Archives a thread; `true` when the thread no longer needs to be remembered.
    async fn archive(&self, thread_id: u64) -> bool {
        match self.gateway.archive_thread(thread_id).await {
            Ok(()) => true,
            Err(e) if e.is_permanent() => {
                tracing::warn!(
                    "Thread {} cannot be archived ({}), forgetting it",
                    thread_id,
                    e
                );
                true
            }
            Err(e) => {
                tracing::warn!("Failed to archive thread {}, will retry: {}", thread_id, e);
                false
            }
        }
    }
}

fn plan_sweep(events: &[Event], now: DateTime<Utc>, settings: &CalendarSettings) -> SweepPlan {
    let tz = &settings.timezone;
    let mut plan = SweepPlan::default();

    for event in events {
        if event.recurring {
            plan.stale_threads.extend(
                event
                    .thread_info
                    .iter()
                    .filter(|(date, _)| date_has_passed(**date, now, tz))
                    .map(|(date, thread_id)| StaleThread {
                        event_id: event.id,
                        date: *date,
                        thread_id: *thread_id,
                    }),
            );
        } else if let Some(schedule) = event.schedule() {
            if date_has_passed(schedule.date, now, tz) {
                plan.expired_events.push((event.id, event.thread_id));
            }
        }
    }

    plan
}
