//! serenity-backed [`CommandSink`]: bulk-overwrites application commands over HTTP.

use crate::{
    core::{
        command::CommandSchema,
        publisher::{CommandSink, PublishTarget},
    },
    errors::Result,
};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::debug;

/// Publishes command lists through serenity's HTTP client.
pub struct HttpCommandSink {
    http: Arc<serenity::Http>,
}

impl HttpCommandSink {
    /// Wraps an HTTP client authenticated with the bot token.
    pub const fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CommandSink for HttpCommandSink {
    async fn put_commands(
        &self,
        target: PublishTarget,
        commands: &[CommandSchema<'_>],
    ) -> Result<usize> {
        self.http
            .set_application_id(serenity::ApplicationId::new(target.application_id()));
        debug!(route = %target.route(), count = commands.len(), "Submitting command definitions");

        let created = match target {
            PublishTarget::Global { .. } => self.http.create_global_commands(&commands).await?,
            PublishTarget::Guild { guild_id, .. } => {
                self.http
                    .create_guild_commands(serenity::GuildId::new(guild_id), &commands)
                    .await?
            }
        };
        Ok(created.len())
    }
}
