//! `/help` - lists every registered command in an embed.

use crate::{
    core::{
        command::{CommandContext, CommandDefinition, CommandHandler},
        interaction::{Embed, Reply},
        registry::CommandRegistry,
    },
    errors::Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

const EMBED_COLOUR: u32 = 0x0099ff;

/// Shows the commands the bot currently answers.
pub struct Help {
    definition: CommandDefinition,
}

impl Default for Help {
    fn default() -> Self {
        Self {
            definition: CommandDefinition::new(
                "help",
                "Shows all available commands and how to use them",
            ),
        }
    }
}

/// Builds the help card for `commands`.
#[must_use]
pub fn help_embed(
    commands: &CommandRegistry,
    avatar_url: Option<String>,
    now: DateTime<Utc>,
) -> Embed {
    let embed = Embed::default()
        .colour(EMBED_COLOUR)
        .title("== Bot Commands ==")
        .description("Here are all the available commands:")
        .timestamp(now)
        .footer("Discord Bot Event", avatar_url);

    if commands.is_empty() {
        return embed.field("No Commands", "No commands are currently loaded.", false);
    }

    commands.definitions().fold(embed, |embed, definition| {
        let description = match definition.description() {
            "" => "No description available",
            text => text,
        };
        embed.field(format!("/{}", definition.name()), description, true)
    })
}

#[async_trait]
impl CommandHandler for Help {
    fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<()> {
        let embed = help_embed(ctx.commands, ctx.interaction.bot_avatar_url(), Utc::now());
        ctx.interaction.reply(Reply::default().embed(embed)).await
    }
}
