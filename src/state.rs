//! Application state shared by the bot's event handler and the scheduled jobs.
//!
//! The state is built once during startup and cloned into every consumer. All fields are
//! reference-counted, so clones share the same store, gateway and locks.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    config::CalendarSettings,
    data::DataStore,
    discord::DiscordGateway,
    service::{calendar::CalendarService, cleanup::CleanupService, thread::ThreadLifecycleService},
};

#[derive(Clone)]
pub struct AppState {
    /// Persisted events and per-guild display state.
    pub store: Arc<DataStore>,

    /// Discord API used by every service.
    pub gateway: Arc<dyn DiscordGateway>,

    /// Timezone, look-ahead, lead time and rendering budget.
    pub settings: Arc<CalendarSettings>,

    /// Held for the duration of a thread pass so passes never overlap.
    pub thread_pass: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `store` - Opened data store
    /// - `gateway` - Discord API gateway
    /// - `settings` - Calendar settings from configuration
    pub fn new(
        store: DataStore,
        gateway: Arc<dyn DiscordGateway>,
        settings: CalendarSettings,
    ) -> Self {
        Self {
            store: Arc::new(store),
            gateway,
            settings: Arc::new(settings),
            thread_pass: Arc::new(Mutex::new(())),
        }
    }

    pub fn calendar_service(&self) -> CalendarService<'_> {
        CalendarService::new(&self.store, self.gateway.clone(), &self.settings)
    }

    pub fn thread_service(&self) -> ThreadLifecycleService<'_> {
        ThreadLifecycleService::new(
            &self.store,
            self.gateway.clone(),
            &self.settings,
            &self.thread_pass,
        )
    }

    pub fn cleanup_service(&self) -> CleanupService<'_> {
        CleanupService::new(&self.store, self.gateway.clone(), &self.settings)
    }
}
