//! Adapts serenity interactions to the core [`Interaction`] trait.

use crate::{
    core::{
        interaction::{Embed, Interaction, InteractionKind, Reply, SentMessage},
        utils::snowflake_timestamp,
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

/// Shard manager slot, filled once the client is built.
pub type ShardManagerSlot = Arc<OnceLock<Arc<serenity::ShardManager>>>;

/// Runs `$body` with `$i` bound to whichever interaction type accepts message
/// responses, or returns an error for the kinds that don't.
macro_rules! with_repliable {
    ($interaction:expr, |$i:ident| $body:expr) => {
        match $interaction {
            serenity::Interaction::Command($i) => $body,
            serenity::Interaction::Component($i) => $body,
            serenity::Interaction::Modal($i) => $body,
            _ => {
                return Err(Error::Reply {
                    message: "this interaction kind does not accept message responses".to_string(),
                })
            }
        }
    };
}

/// One gateway interaction together with the context needed to answer it.
pub struct SerenityInteraction {
    ctx: serenity::Context,
    interaction: serenity::Interaction,
    user_tag: String,
    bot_avatar_url: Option<String>,
    shard_manager: ShardManagerSlot,
}

impl SerenityInteraction {
    /// Wraps an interaction received on `ctx`'s shard.
    pub fn new(
        ctx: serenity::Context,
        interaction: serenity::Interaction,
        shard_manager: ShardManagerSlot,
    ) -> Self {
        let user_tag = match &interaction {
            serenity::Interaction::Command(i) | serenity::Interaction::Autocomplete(i) => {
                i.user.tag()
            }
            serenity::Interaction::Component(i) => i.user.tag(),
            serenity::Interaction::Modal(i) => i.user.tag(),
            _ => "unknown".to_string(),
        };
        let bot_avatar_url = Some(ctx.cache.current_user().face());

        Self {
            ctx,
            interaction,
            user_tag,
            bot_avatar_url,
            shard_manager,
        }
    }
}

#[async_trait]
impl Interaction for SerenityInteraction {
    fn kind(&self) -> InteractionKind {
        match &self.interaction {
            serenity::Interaction::Command(i)
                if i.data.kind == serenity::CommandType::ChatInput =>
            {
                InteractionKind::ChatInputCommand
            }
            serenity::Interaction::Command(_) => InteractionKind::ContextMenuCommand,
            serenity::Interaction::Autocomplete(_) => InteractionKind::Autocomplete,
            serenity::Interaction::Component(_) => InteractionKind::Component,
            serenity::Interaction::Modal(_) => InteractionKind::ModalSubmit,
            _ => InteractionKind::Ping,
        }
    }

    fn command_name(&self) -> Option<&str> {
        match &self.interaction {
            serenity::Interaction::Command(i) | serenity::Interaction::Autocomplete(i) => {
                Some(i.data.name.as_str())
            }
            _ => None,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        snowflake_timestamp(self.interaction.id().get())
    }

    fn user_tag(&self) -> &str {
        &self.user_tag
    }

    fn bot_avatar_url(&self) -> Option<String> {
        self.bot_avatar_url.clone()
    }

    async fn gateway_latency(&self) -> Option<Duration> {
        let manager = self.shard_manager.get()?;
        let runners = manager.runners.lock().await;
        runners
            .get(&self.ctx.shard_id)
            .and_then(|runner| runner.latency)
    }

    async fn reply(&self, reply: Reply) -> Result<()> {
        let response = serenity::CreateInteractionResponse::Message(response_message(reply));
        with_repliable!(&self.interaction, |i| i
            .create_response(&self.ctx.http, response)
            .await?);
        Ok(())
    }

    async fn edit_reply(&self, reply: Reply) -> Result<SentMessage> {
        let edit = edit_response(reply);
        let message = with_repliable!(&self.interaction, |i| i
            .edit_response(&self.ctx.http, edit)
            .await?);
        Ok(sent_message(&message))
    }

    async fn fetch_reply(&self) -> Result<SentMessage> {
        let message = with_repliable!(&self.interaction, |i| i
            .get_response(&self.ctx.http)
            .await?);
        Ok(sent_message(&message))
    }
}

fn sent_message(message: &serenity::Message) -> SentMessage {
    SentMessage {
        id: message.id.get(),
        created_at: snowflake_timestamp(message.id.get()),
    }
}

fn response_message(reply: Reply) -> serenity::CreateInteractionResponseMessage {
    let mut message = serenity::CreateInteractionResponseMessage::new()
        .ephemeral(reply.ephemeral)
        .embeds(reply.embeds.into_iter().map(create_embed).collect());
    if let Some(content) = reply.content {
        message = message.content(content);
    }
    message
}

fn edit_response(reply: Reply) -> serenity::EditInteractionResponse {
    let mut edit = serenity::EditInteractionResponse::new();
    if let Some(content) = reply.content {
        edit = edit.content(content);
    }
    if !reply.embeds.is_empty() {
        edit = edit.embeds(reply.embeds.into_iter().map(create_embed).collect());
    }
    edit
}

fn create_embed(embed: Embed) -> serenity::CreateEmbed {
    let mut out = serenity::CreateEmbed::new();
    if let Some(colour) = embed.colour {
        out = out.colour(colour);
    }
    if let Some(title) = embed.title {
        out = out.title(title);
    }
    if let Some(description) = embed.description {
        out = out.description(description);
    }
    for field in embed.fields {
        out = out.field(field.name, field.value, field.inline);
    }
    if let Some(footer) = embed.footer {
        let mut builder = serenity::CreateEmbedFooter::new(footer.text);
        if let Some(icon_url) = footer.icon_url {
            builder = builder.icon_url(icon_url);
        }
        out = out.footer(builder);
    }
    if let Some(timestamp) = embed
        .timestamp
        .and_then(|ts| serenity::Timestamp::from_unix_timestamp(ts.timestamp()).ok())
    {
        out = out.timestamp(timestamp);
    }
    out
}
