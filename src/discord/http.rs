use serenity::{
    all::{
        AutoArchiveDuration, ChannelId, ChannelType, CreateEmbed, CreateEmbedFooter,
        CreateMessage, CreateThread, EditMessage, EditThread, GuildId, MessageId, Timestamp,
    },
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::{
    discord::DiscordGateway,
    error::discord::DiscordError,
    model::display::{CalendarEmbed, CalendarMessage},
};

/// `DiscordGateway` backed by serenity's HTTP client.
pub struct HttpGateway {
    http: Arc<Http>,
}

impl HttpGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl DiscordGateway for HttpGateway {
    async fn send_message(
        &self,
        channel_id: u64,
        message: &CalendarMessage,
    ) -> Result<u64, DiscordError> {
        let mut builder = CreateMessage::new().embeds(to_embeds(message));
        if let Some(content) = &message.content {
            builder = builder.content(content);
        }

        let sent = channel(channel_id)?
            .send_message(&self.http, builder)
            .await?;

        Ok(sent.id.get())
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        message: &CalendarMessage,
    ) -> Result<(), DiscordError> {
        let message_id = non_zero(message_id).map(MessageId::new)?;

        let builder = EditMessage::new()
            .content(message.content.clone().unwrap_or_default())
            .embeds(to_embeds(message));

        channel(channel_id)?
            .edit_message(&self.http, message_id, builder)
            .await?;

        Ok(())
    }

    async fn create_thread(&self, channel_id: u64, name: &str) -> Result<u64, DiscordError> {
        let builder = CreateThread::new(name)
            .kind(ChannelType::PublicThread)
            .auto_archive_duration(AutoArchiveDuration::OneWeek);

        let thread = channel(channel_id)?
            .create_thread(&self.http, builder)
            .await?;

        Ok(thread.id.get())
    }

    async fn archive_thread(&self, thread_id: u64) -> Result<(), DiscordError> {
        let builder = EditThread::new().archived(true).locked(true);

        channel(thread_id)?.edit_thread(&self.http, builder).await?;

        Ok(())
    }

    async fn text_channels(&self, guild_id: u64) -> Result<Vec<u64>, DiscordError> {
        let guild_id = non_zero(guild_id).map(GuildId::new)?;
        let channels = guild_id.channels(&self.http).await?;

        let mut text_channels: Vec<_> = channels
            .into_values()
            .filter(|channel| channel.kind == ChannelType::Text)
            .map(|channel| (channel.position, channel.id.get()))
            .collect();
        text_channels.sort_unstable();

        Ok(text_channels.into_iter().map(|(_, id)| id).collect())
    }
}

/// Serenity ids panic on zero; a zero id can only refer to nothing.
fn non_zero(id: u64) -> Result<u64, DiscordError> {
    if id == 0 {
        return Err(DiscordError::NotFound);
    }
    Ok(id)
}

fn channel(channel_id: u64) -> Result<ChannelId, DiscordError> {
    non_zero(channel_id).map(ChannelId::new)
}

fn to_embeds(message: &CalendarMessage) -> Vec<CreateEmbed> {
    message.embeds.iter().map(to_embed).collect()
}

fn to_embed(embed: &CalendarEmbed) -> CreateEmbed {
    let mut builder = CreateEmbed::new().color(embed.color);

    if let Some(title) = &embed.title {
        builder = builder.title(title);
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description);
    }
    for field in &embed.fields {
        builder = builder.field(&field.name, &field.value, false);
    }
    if let Some(footer) = &embed.footer {
        builder = builder.footer(CreateEmbedFooter::new(footer));
    }
    if let Some(timestamp) = embed.timestamp {
        builder = builder.timestamp(Timestamp::from(timestamp));
    }

    builder
}
