use std::{error::Error, sync::Arc};

use async_trait::async_trait;
use tokio::{
    task::JoinHandle,
    time::{Duration, sleep},
};
use tracing::{debug, error};
use twilight_http::{
    Client,
    request::{AuditLogReason as _, channel::reaction::RequestReactionType},
};
use twilight_model::{
    channel::message::embed::Embed,
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker, UserMarker},
    },
};

use crate::embed::error_embed;

/// Reaction glyph (`:x:`) attached to deletable messages.
pub const DELETABLE_EMOJI: &str = "\u{274C}";

/// Content of a message about to be sent: plain text, embeds, or both.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutgoingMessage {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
}

impl OutgoingMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embeds: Vec::new(),
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
        }
    }
}

impl From<&str> for OutgoingMessage {
    fn from(content: &str) -> Self {
        Self::text(content)
    }
}

impl From<String> for OutgoingMessage {
    fn from(content: String) -> Self {
        Self::text(content)
    }
}

impl From<Embed> for OutgoingMessage {
    fn from(embed: Embed) -> Self {
        Self::embed(embed)
    }
}

/// A message the platform accepted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SentMessage {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
}

/// The chat requests the messaging helpers are built on.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn send_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message: &OutgoingMessage,
    ) -> anyhow::Result<SentMessage>;

    /// React to a message with a unicode emoji.
    async fn add_reaction(&self, message: SentMessage, emoji: &str) -> anyhow::Result<()>;

    async fn delete_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        reason: Option<&str>,
    ) -> anyhow::Result<()>;

    /// Open the DM channel with a user. The platform returns the existing
    /// channel when one is already open.
    async fn open_private_channel(
        &self,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<Id<ChannelMarker>>;
}

#[async_trait]
impl ChatApi for Client {
    async fn send_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message: &OutgoingMessage,
    ) -> anyhow::Result<SentMessage> {
        let mut request = self.create_message(channel_id);
        if let Some(content) = message.content.as_deref() {
            request = request.content(content);
        }
        if !message.embeds.is_empty() {
            request = request.embeds(&message.embeds);
        }

        let sent = request.await?.model().await?;

        Ok(SentMessage {
            channel_id: sent.channel_id,
            message_id: sent.id,
        })
    }

    async fn add_reaction(&self, message: SentMessage, emoji: &str) -> anyhow::Result<()> {
        let reaction = RequestReactionType::Unicode { name: emoji };
        self.create_reaction(message.channel_id, message.message_id, &reaction)
            .await?;

        Ok(())
    }

    async fn delete_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        reason: Option<&str>,
    ) -> anyhow::Result<()> {
        let mut request = Client::delete_message(self, channel_id, message_id);
        if let Some(reason) = reason {
            request = request.reason(reason);
        }
        request.await?;

        Ok(())
    }

    async fn open_private_channel(
        &self,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<Id<ChannelMarker>> {
        let channel = self.create_private_channel(user_id).await?.model().await?;
        Ok(channel.id)
    }
}

/// Fire-and-forget messaging helpers.
///
/// Every operation spawns a task and returns immediately. Failures are logged
/// and never retried; the returned handle only tells when the task finished.
pub struct Messenger<C> {
    client: Arc<C>,
}

impl<C> Clone for Messenger<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C> Messenger<C>
where
    C: ChatApi + 'static,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn send_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message: impl Into<OutgoingMessage>,
    ) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let message = message.into();

        tokio::spawn(async move {
            let _ = send(client.as_ref(), channel_id, &message).await;
        })
    }

    /// Send a message and mark it with [`DELETABLE_EMOJI`] once it is posted.
    pub fn send_deletable_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message: impl Into<OutgoingMessage>,
    ) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let message = message.into();

        tokio::spawn(async move {
            send_deletable(client.as_ref(), channel_id, &message).await;
        })
    }

    /// Send a message that deletes itself `seconds` after it was posted.
    pub fn send_self_destructing_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message: impl Into<OutgoingMessage>,
        seconds: u64,
    ) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let message = message.into();

        tokio::spawn(async move {
            send_self_destructing(client.as_ref(), channel_id, &message, seconds).await;
        })
    }

    pub fn delete_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> JoinHandle<()> {
        self.spawn_delete(channel_id, message_id, None)
    }

    /// Delete a message, recording `reason` in the audit log.
    pub fn delete_message_with_reason(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        reason: impl Into<String>,
    ) -> JoinHandle<()> {
        self.spawn_delete(channel_id, message_id, Some(reason.into()))
    }

    /// Report an error to a channel as a deletable error panel.
    pub fn send_error_message<E>(&self, channel_id: Id<ChannelMarker>, error: &E) -> JoinHandle<()>
    where
        E: Error + ?Sized,
    {
        let embed = error_embed(error);
        let client = Arc::clone(&self.client);

        tokio::spawn(async move {
            match embed {
                Ok(embed) => {
                    send_deletable(client.as_ref(), channel_id, &OutgoingMessage::embed(embed))
                        .await;
                }
                Err(source) => {
                    error!(?source, channel_id = channel_id.get(), "error embed is invalid");
                }
            }
        })
    }

    pub fn send_direct_message(
        &self,
        user_id: Id<UserMarker>,
        message: impl Into<OutgoingMessage>,
    ) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let message = message.into();

        tokio::spawn(async move {
            if let Some(channel_id) = open_private_channel(client.as_ref(), user_id).await {
                let _ = send(client.as_ref(), channel_id, &message).await;
            }
        })
    }

    pub fn send_deletable_direct_message(
        &self,
        user_id: Id<UserMarker>,
        message: impl Into<OutgoingMessage>,
    ) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let message = message.into();

        tokio::spawn(async move {
            if let Some(channel_id) = open_private_channel(client.as_ref(), user_id).await {
                send_deletable(client.as_ref(), channel_id, &message).await;
            }
        })
    }

    pub fn send_self_destructing_direct_message(
        &self,
        user_id: Id<UserMarker>,
        message: impl Into<OutgoingMessage>,
        seconds: u64,
    ) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let message = message.into();

        tokio::spawn(async move {
            if let Some(channel_id) = open_private_channel(client.as_ref(), user_id).await {
                send_self_destructing(client.as_ref(), channel_id, &message, seconds).await;
            }
        })
    }

    fn spawn_delete(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        reason: Option<String>,
    ) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);

        tokio::spawn(async move {
            delete(client.as_ref(), channel_id, message_id, reason.as_deref()).await;
        })
    }
}

async fn send<C>(
    client: &C,
    channel_id: Id<ChannelMarker>,
    message: &OutgoingMessage,
) -> Option<SentMessage>
where
    C: ChatApi + ?Sized,
{
    match client.send_message(channel_id, message).await {
        Ok(sent) => {
            debug!(
                channel_id = channel_id.get(),
                message_id = sent.message_id.get(),
                "message sent"
            );
            Some(sent)
        }
        Err(source) => {
            error!(?source, channel_id = channel_id.get(), "send message request failed");
            None
        }
    }
}

async fn send_deletable<C>(client: &C, channel_id: Id<ChannelMarker>, message: &OutgoingMessage)
where
    C: ChatApi + ?Sized,
{
    let Some(sent) = send(client, channel_id, message).await else {
        return;
    };

    if let Err(source) = client.add_reaction(sent, DELETABLE_EMOJI).await {
        error!(
            ?source,
            channel_id = channel_id.get(),
            message_id = sent.message_id.get(),
            "adding delete reaction failed"
        );
    }
}

async fn send_self_destructing<C>(
    client: &C,
    channel_id: Id<ChannelMarker>,
    message: &OutgoingMessage,
    seconds: u64,
) where
    C: ChatApi + ?Sized,
{
    let Some(sent) = send(client, channel_id, message).await else {
        return;
    };

    sleep(Duration::from_secs(seconds)).await;
    delete(client, sent.channel_id, sent.message_id, None).await;
}

async fn delete<C>(
    client: &C,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
    reason: Option<&str>,
) where
    C: ChatApi + ?Sized,
{
    if let Err(source) = client.delete_message(channel_id, message_id, reason).await {
        error!(
            ?source,
            channel_id = channel_id.get(),
            message_id = message_id.get(),
            "delete message request failed"
        );
    }
}

async fn open_private_channel<C>(client: &C, user_id: Id<UserMarker>) -> Option<Id<ChannelMarker>>
where
    C: ChatApi + ?Sized,
{
    match client.open_private_channel(user_id).await {
        Ok(channel_id) => Some(channel_id),
        Err(source) => {
            error!(?source, user_id = user_id.get(), "opening private channel failed");
            None
        }
    }
}
