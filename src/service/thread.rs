//! Discussion thread lifecycle.
//!
//! Shortly before an occurrence, a public thread is opened for it in the guild's thread
//! channel and announced with the occurrence's details. The pass works on a snapshot of
//! the store, performs all Discord calls without holding any lock, and only then records
//! the new thread under the store lock, re-checking that no other thread won the race.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use dioxus_logger::tracing;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    config::CalendarSettings,
    data::{
        event::{EventRepository, ThreadRecord},
        guild_display::GuildDisplayRepository,
        DataStore,
    },
    discord::DiscordGateway,
    error::{discord::DiscordError, AppError},
    model::{
        display::{CalendarEmbed, CalendarMessage},
        event::{Event, MAX_TITLE_LENGTH},
        guild_display::GuildDisplay,
        occurrence::OccurrenceView,
    },
    service::{
        calendar::{
            render::{format_occurrence_block, format_occurrence_date},
            CalendarService,
        },
        occurrence::occurrences_of,
    },
};

const THREAD_EMBED_COLOR: u32 = 0x3498db;

/// Width of the trigger window below the lead time, in hours.
const TRIGGER_WINDOW_HOURS: i64 = 4;

/// An occurrence that needs a discussion thread now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadCandidate {
    pub event_id: u64,
    pub guild_id: u64,
    pub title: String,
    pub date: NaiveDate,
    /// Human readable date of the occurrence, for the announcement.
    pub date_text: String,
    /// The occurrence rendered as in the calendar summary.
    pub block: String,
}

/// Outcome counts of one thread pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadPassReport {
    /// Threads opened and recorded.
    pub opened: usize,
    /// Candidates left for the next pass after a Discord failure.
    pub failed: usize,
    /// Threads archived again because the occurrence got a thread meanwhile or went away.
    pub surplus: usize,
}

/// Service opening discussion threads ahead of occurrences.
pub struct ThreadLifecycleService<'a> {
    store: &'a DataStore,
    gateway: Arc<dyn DiscordGateway>,
    settings: &'a CalendarSettings,
    pass_lock: &'a Mutex<()>,
}

impl<'a> ThreadLifecycleService<'a> {
    /// Creates a new ThreadLifecycleService instance.
    ///
    /// # Arguments
    /// - `store` - Reference to the data store
    /// - `gateway` - Discord API gateway
    /// - `settings` - Calendar settings providing the lead time
    /// - `pass_lock` - Shared lock ensuring passes never overlap
    pub fn new(
        store: &'a DataStore,
        gateway: Arc<dyn DiscordGateway>,
        settings: &'a CalendarSettings,
        pass_lock: &'a Mutex<()>,
    ) -> Self {
        Self {
            store,
            gateway,
            settings,
            pass_lock,
        }
    }

    /// Runs one thread pass.
    ///
    /// Discord failures only affect the candidate they occurred for; it is retried on the
    /// next pass. Guilds that got new threads have their summary refreshed so it links
    /// them.
    ///
    /// # Arguments
    /// - `now` - Reference instant
    ///
    /// # Returns
    /// - `Ok(Some(ThreadPassReport))` - The pass ran
    /// - `Ok(None)` - Another pass is still running; this one was skipped
    /// - `Err(AppError)` - The store could not be read
    pub async fn run(&self, now: DateTime<Utc>) -> Result<Option<ThreadPassReport>, AppError> {
        let Ok(_pass) = self.pass_lock.try_lock() else {
            tracing::debug!("Previous thread pass still running, skipping");
            return Ok(None);
        };

        let events = EventRepository::new(self.store).get_all().await?;
        let candidates = find_thread_candidates(&events, now, self.settings);
        if candidates.is_empty() {
            tracing::debug!("No occurrences need a thread");
            return Ok(Some(ThreadPassReport::default()));
        }

        let displays = GuildDisplayRepository::new(self.store).get_all().await?;
        let mut report = ThreadPassReport::default();
        let mut refreshed_guilds = BTreeSet::new();

        for candidate in candidates {
            let display = displays
                .get(&candidate.guild_id)
                .cloned()
                .unwrap_or_default();

            match self.open_thread(&candidate, &display).await {
                Ok(ThreadRecord::Recorded) => {
                    report.opened += 1;
                    refreshed_guilds.insert(candidate.guild_id);
                }
                Ok(_) => report.surplus += 1,
                Err(e) => {
                    tracing::warn!(
                        "Could not open thread for event {} on {}: {}",
                        candidate.event_id,
                        candidate.date,
                        e
                    );
                    report.failed += 1;
                }
            }
        }

        CalendarService::new(self.store, self.gateway.clone(), self.settings)
            .refresh_guilds(refreshed_guilds, now)
            .await;

        tracing::info!(
            "Thread pass finished: {} opened, {} failed, {} surplus",
            report.opened,
            report.failed,
            report.surplus
        );

        Ok(Some(report))
    }

    /// Creates, announces and records the thread of one candidate.
    ///
    /// # Returns
    /// - `Ok(ThreadRecord::Recorded)` - The thread is now the occurrence's thread
    /// - `Ok(ThreadRecord)` - The thread lost a race and was archived again
    /// - `Err(AppError)` - Nothing was recorded; any created thread was archived
    async fn open_thread(
        &self,
        candidate: &ThreadCandidate,
        display: &GuildDisplay,
    ) -> Result<ThreadRecord, AppError> {
        let thread_id = self.create_in_guild(candidate, display).await?;

        let announcement = CalendarMessage {
            content: Some(format!(
                "This thread is for the occurrence on {}.",
                candidate.date_text
            )),
            embeds: vec![CalendarEmbed {
                description: Some(candidate.block.clone()),
                color: THREAD_EMBED_COLOR,
                ..Default::default()
            }],
        };

        if let Err(e) = self.gateway.send_message(thread_id, &announcement).await {
            self.archive_best_effort(thread_id).await;
            return Err(e.into());
        }

        let record = match EventRepository::new(self.store)
            .record_thread(candidate.event_id, candidate.date, thread_id)
            .await
        {
            Ok(record) => record,
            Err(e) => {
                self.archive_best_effort(thread_id).await;
                return Err(e);
            }
        };

        match &record {
            ThreadRecord::Recorded => tracing::info!(
                "Opened thread {} for event {} '{}' on {}",
                thread_id,
                candidate.event_id,
                candidate.title,
                candidate.date
            ),
            ThreadRecord::AlreadyRecorded(existing) => {
                tracing::warn!(
                    "Event {} already has thread {} for {}, archiving duplicate {}",
                    candidate.event_id,
                    existing,
                    candidate.date,
                    thread_id
                );
                self.archive_best_effort(thread_id).await;
            }
            ThreadRecord::EventGone => {
                tracing::info!(
                    "Event {} changed while its thread was opened, archiving thread {}",
                    candidate.event_id,
                    thread_id
                );
                self.archive_best_effort(thread_id).await;
            }
        }

        Ok(record)
    }

    /// Opens the thread in the first channel of the guild that accepts it.
    ///
    /// Tries the configured thread channel, then the summary channel, then every text
    /// channel in list order. Only missing channels and missing permissions move on to the
    /// next channel; other failures end the attempt.
    async fn create_in_guild(
        &self,
        candidate: &ThreadCandidate,
        display: &GuildDisplay,
    ) -> Result<u64, AppError> {
        let name: String = candidate.title.chars().take(MAX_TITLE_LENGTH).collect();
        let mut tried = BTreeSet::new();

        let configured = [display.thread_channel_id, display.channel_id];
        for channel_id in configured.into_iter().flatten() {
            if !tried.insert(channel_id) {
                continue;
            }
            match self.try_create(channel_id, &name).await? {
                Some(thread_id) => return Ok(thread_id),
                None => continue,
            }
        }

        let channels = self.gateway.text_channels(candidate.guild_id).await?;
        for channel_id in channels {
            if !tried.insert(channel_id) {
                continue;
            }
            if let Some(thread_id) = self.try_create(channel_id, &name).await? {
                return Ok(thread_id);
            }
        }

        Err(AppError::NotFound(format!(
            "No channel in guild {} accepts threads",
            candidate.guild_id
        )))
    }

    /// `Ok(None)` when the channel is unusable and the next one should be tried.
    async fn try_create(&self, channel_id: u64, name: &str) -> Result<Option<u64>, AppError> {
        match self.gateway.create_thread(channel_id, name).await {
            Ok(thread_id) => Ok(Some(thread_id)),
            Err(e) if e.is_permanent() => {
                tracing::debug!("Cannot open threads in channel {}: {}", channel_id, e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn archive_best_effort(&self, thread_id: u64) {
        match self.gateway.archive_thread(thread_id).await {
            Ok(()) | Err(DiscordError::NotFound) => {}
            Err(e) => tracing::warn!("Failed to archive thread {}: {}", thread_id, e),
        }
    }
}

/// Occurrences whose discussion thread is due.
///
/// An occurrence qualifies when its event has a date and wants threads, no thread is
/// recorded for it yet, and it starts between `max(1, T - 4)` and `T` hours from now,
/// where `T` is the configured lead time.
///
/// # Arguments
/// - `events` - Snapshot of every stored event
/// - `now` - Reference instant
/// - `settings` - Provides the lead time and timezone
///
/// # Returns
/// - Candidates ordered by occurrence time
pub fn find_thread_candidates(
    events: &[Event],
    now: DateTime<Utc>,
    settings: &CalendarSettings,
) -> Vec<ThreadCandidate> {
    let lead = settings.thread_lead_hours;
    let earliest = Duration::hours((lead - TRIGGER_WINDOW_HOURS).max(1));
    let latest = Duration::hours(lead);

    let mut due: BTreeMap<(DateTime<Utc>, u64), ThreadCandidate> = BTreeMap::new();

    for event in events.iter().filter(|event| event.create_threads) {
        for occurrence in occurrences_of(event, now, latest, &settings.timezone) {
            let until = occurrence.with_timezone(&Utc) - now;
            if until < earliest || until > latest {
                continue;
            }

            let view = OccurrenceView::new(event, occurrence);
            if view.thread_id().is_some() {
                continue;
            }

            due.insert(
                (occurrence.with_timezone(&Utc), event.id),
                ThreadCandidate {
                    event_id: event.id,
                    guild_id: event.guild_id,
                    title: event.title.clone(),
                    date: view.date(),
                    date_text: format_occurrence_date(&view),
                    block: format_occurrence_block(&view),
                },
            );
        }
    }

    due.into_values().collect()
}
