//! Recording gateway for service tests.
//!
//! Every call is recorded in order. Failures can be injected per operation and target id;
//! everything else succeeds with freshly generated ids.

use serenity::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::{
    discord::DiscordGateway, error::discord::DiscordError, model::display::CalendarMessage,
};

const FIRST_GENERATED_ID: u64 = 900_000;

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    SendMessage {
        channel_id: u64,
        message: CalendarMessage,
    },
    EditMessage {
        channel_id: u64,
        message_id: u64,
        message: CalendarMessage,
    },
    CreateThread {
        channel_id: u64,
        name: String,
    },
    ArchiveThread {
        thread_id: u64,
    },
    TextChannels {
        guild_id: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Operation {
    Send,
    Edit,
    CreateThread,
    Archive,
    TextChannels,
}

#[derive(Default)]
struct MockState {
    calls: Vec<GatewayCall>,
    next_id: u64,
    failures: HashMap<(Operation, u64), DiscordError>,
    thread_post_failure: Option<DiscordError>,
    created_threads: HashSet<u64>,
    text_channels: HashMap<u64, Vec<u64>>,
    send_yields: usize,
}

#[derive(Default)]
pub struct MockGateway {
    state: Mutex<MockState>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sending into `channel_id` fails with `error`.
    pub fn fail_send(self, channel_id: u64, error: DiscordError) -> Self {
        self.fail(Operation::Send, channel_id, error)
    }

    /// Editing `message_id` fails with `error`.
    pub fn fail_edit(self, message_id: u64, error: DiscordError) -> Self {
        self.fail(Operation::Edit, message_id, error)
    }

    /// Opening a thread in `channel_id` fails with `error`.
    pub fn fail_create_thread(self, channel_id: u64, error: DiscordError) -> Self {
        self.fail(Operation::CreateThread, channel_id, error)
    }

    /// Archiving `thread_id` fails with `error`.
    pub fn fail_archive(self, thread_id: u64, error: DiscordError) -> Self {
        self.fail(Operation::Archive, thread_id, error)
    }

    /// Listing the channels of `guild_id` fails with `error`.
    pub fn fail_text_channels(self, guild_id: u64, error: DiscordError) -> Self {
        self.fail(Operation::TextChannels, guild_id, error)
    }

    /// Posting into any thread created through this mock fails with `error`.
    pub fn fail_thread_posts(self, error: DiscordError) -> Self {
        self.state.lock().unwrap().thread_post_failure = Some(error);
        self
    }

    pub fn with_text_channels(self, guild_id: u64, channels: Vec<u64>) -> Self {
        self.state
            .lock()
            .unwrap()
            .text_channels
            .insert(guild_id, channels);
        self
    }

    /// Every send yields to the runtime `yields` times first, letting concurrent
    /// callers interleave.
    pub fn with_slow_sends(self, yields: usize) -> Self {
        self.state.lock().unwrap().send_yields = yields;
        self
    }

    fn fail(self, operation: Operation, id: u64, error: DiscordError) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert((operation, id), error);
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// `(channel_id, message)` of every send attempt.
    pub fn sent_messages(&self) -> Vec<(u64, CalendarMessage)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::SendMessage {
                    channel_id,
                    message,
                } => Some((channel_id, message)),
                _ => None,
            })
            .collect()
    }

    /// `(channel_id, message_id)` of every edit attempt.
    pub fn edited_messages(&self) -> Vec<(u64, u64)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::EditMessage {
                    channel_id,
                    message_id,
                    ..
                } => Some((channel_id, message_id)),
                _ => None,
            })
            .collect()
    }

    /// `(channel_id, name)` of every thread creation attempt.
    pub fn thread_attempts(&self) -> Vec<(u64, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::CreateThread { channel_id, name } => Some((channel_id, name)),
                _ => None,
            })
            .collect()
    }

    /// Ids of threads that were successfully created.
    pub fn created_threads(&self) -> HashSet<u64> {
        self.state.lock().unwrap().created_threads.clone()
    }

    /// Every archive attempt, in order.
    pub fn archived_threads(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::ArchiveThread { thread_id } => Some(thread_id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GatewayCall, operation: Operation, id: u64) -> Result<(), DiscordError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);

        if let Some(error) = state.failures.get(&(operation, id)) {
            return Err(error.clone());
        }
        if operation == Operation::Send && state.created_threads.contains(&id) {
            if let Some(error) = &state.thread_post_failure {
                return Err(error.clone());
            }
        }

        Ok(())
    }

    fn generate_id(&self) -> u64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        FIRST_GENERATED_ID + state.next_id
    }
}

#[async_trait]
impl DiscordGateway for MockGateway {
    async fn send_message(
        &self,
        channel_id: u64,
        message: &CalendarMessage,
    ) -> Result<u64, DiscordError> {
        let yields = self.state.lock().unwrap().send_yields;
        for _ in 0..yields {
            tokio::task::yield_now().await;
        }

        self.record(
            GatewayCall::SendMessage {
                channel_id,
                message: message.clone(),
            },
            Operation::Send,
            channel_id,
        )?;

        Ok(self.generate_id())
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: &CalendarMessage,
    ) -> Result<(), DiscordError> {
        self.record(
            GatewayCall::EditMessage {
                channel_id,
                message_id,
                message: message.clone(),
            },
            Operation::Edit,
            message_id,
        )
    }

    async fn create_thread(&self, channel_id: u64, name: &str) -> Result<u64, DiscordError> {
        self.record(
            GatewayCall::CreateThread {
                channel_id,
                name: name.to_string(),
            },
            Operation::CreateThread,
            channel_id,
        )?;

        let thread_id = self.generate_id();
        self.state.lock().unwrap().created_threads.insert(thread_id);
        Ok(thread_id)
    }

    async fn archive_thread(&self, thread_id: u64) -> Result<(), DiscordError> {
        self.record(
            GatewayCall::ArchiveThread { thread_id },
            Operation::Archive,
            thread_id,
        )
    }

    async fn text_channels(&self, guild_id: u64) -> Result<Vec<u64>, DiscordError> {
        self.record(
            GatewayCall::TextChannels { guild_id },
            Operation::TextChannels,
            guild_id,
        )?;

        Ok(self
            .state
            .lock()
            .unwrap()
            .text_channels
            .get(&guild_id)
            .cloned()
            .unwrap_or_default())
    }
}
