//! [`BotClient`] over a serenity gateway context.

use crate::{
    core::client::BotClient,
    errors::{Error, Result},
};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;

/// The shard context an event arrived on.
#[derive(Clone)]
pub struct SerenityClient {
    ctx: serenity::Context,
}

impl SerenityClient {
    /// Wraps the context of the current event.
    pub const fn new(ctx: serenity::Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl BotClient for SerenityClient {
    fn set_activity(&self, activity: Option<&str>) {
        self.ctx
            .set_activity(activity.map(serenity::ActivityData::playing));
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> Result<u64> {
        if channel_id == 0 {
            return Err(Error::hook("channel id must be non-zero"));
        }
        let message = serenity::ChannelId::new(channel_id)
            .say(&self.ctx, content)
            .await?;
        Ok(message.id.get())
    }
}
