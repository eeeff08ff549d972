// Serenity-backed implementation of the router's delivery port.

use crate::core::relay::{ChannelRef, DeliveryError, DeliveryGateway, EmbedSpec};
use crate::discord::relay::embeds::to_create_embed;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

pub struct SerenityGateway {
    http: Arc<serenity::Http>,
    cache: Arc<serenity::Cache>,
    bot_id: serenity::UserId,
}

impl SerenityGateway {
    pub fn new(
        http: Arc<serenity::Http>,
        cache: Arc<serenity::Cache>,
        bot_id: serenity::UserId,
    ) -> Self {
        Self { http, cache, bot_id }
    }
}

#[async_trait]
impl DeliveryGateway for SerenityGateway {
    async fn resolve_channel(&self, channel_id: u64) -> Result<Option<ChannelRef>, DeliveryError> {
        // ChannelId::new panics on zero.
        if channel_id == 0 {
            return Ok(None);
        }

        let channel = serenity::ChannelId::new(channel_id)
            .to_channel(&self.http)
            .await?;
        Ok(channel.guild().map(|gc| ChannelRef {
            id: gc.id.get(),
            name: gc.name,
        }))
    }

    async fn can_send_to_channel(&self, channel_id: u64) -> Result<bool, DeliveryError> {
        if channel_id == 0 {
            return Ok(false);
        }

        let channel = serenity::ChannelId::new(channel_id)
            .to_channel(&self.http)
            .await?;
        let Some(guild_channel) = channel.guild() else {
            return Ok(false);
        };

        let guild_id = guild_channel.guild_id;
        let cached_member = self
            .cache
            .guild(guild_id)
            .and_then(|guild| guild.members.get(&self.bot_id).cloned());
        let member = match cached_member {
            Some(member) => member,
            None => guild_id.member(&self.http, self.bot_id).await?,
        };

        let guild = self.cache.guild(guild_id).ok_or_else(|| {
            DeliveryError::Platform(format!("Guild {} is not cached", guild_id))
        })?;
        Ok(guild
            .user_permissions_in(&guild_channel, &member)
            .send_messages())
    }

    async fn send_to_channel(&self, channel_id: u64, content: &str) -> Result<(), DeliveryError> {
        serenity::ChannelId::new(channel_id)
            .say(&self.http, content)
            .await?;
        Ok(())
    }

    async fn send_direct_embed(&self, user_id: u64, embed: &EmbedSpec) -> Result<(), DeliveryError> {
        serenity::UserId::new(user_id)
            .direct_message(
                &self.http,
                serenity::CreateMessage::new().embed(to_create_embed(embed)),
            )
            .await?;
        Ok(())
    }
}

/// Sort serenity failures into the buckets the router logs.
impl From<serenity::Error> for DeliveryError {
    fn from(err: serenity::Error) -> Self {
        match &err {
            serenity::Error::Http(http_err) => match http_err.status_code().map(|s| s.as_u16()) {
                Some(403) => DeliveryError::Forbidden(err.to_string()),
                Some(404) => DeliveryError::Unreachable(err.to_string()),
                _ => DeliveryError::Platform(err.to_string()),
            },
            _ => DeliveryError::Platform(err.to_string()),
        }
    }
}
