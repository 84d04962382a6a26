//! Interaction dispatcher - routes each interaction to its command handler.
//!
//! Routing rules:
//! 1. the pre-dispatch hook runs first; if it fails the event is dropped
//! 2. anything that is not a slash command is ignored
//! 3. unknown command names are ignored without replying
//! 4. the matching handler runs; its failure is caught here, logged, and answered
//!    with a generic ephemeral notice

use crate::{
    core::{
        client::BotClient,
        command::CommandContext,
        hooks::Hooks,
        interaction::{Interaction, Reply},
        registry::CommandRegistry,
        stats::BotStats,
    },
    errors::Result,
};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Text of the notice sent when a handler fails.
pub const GENERIC_FAILURE_MESSAGE: &str = "There was an error!";

/// How a single interaction was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a slash command
    Ignored,
    /// No handler registered under the invoked name
    UnknownCommand {
        /// The invoked name
        name: String,
    },
    /// The handler ran to completion
    Executed {
        /// Command that ran
        name: String,
    },
    /// The handler failed and a generic notice was attempted
    Failed {
        /// Command that failed
        name: String,
        /// Whether the notice reached the user
        reply_delivered: bool,
    },
}

/// Routes interactions to handlers from an injected registry.
pub struct Dispatcher {
    commands: Arc<CommandRegistry>,
    hooks: Hooks,
    stats: Arc<BotStats>,
}

impl Dispatcher {
    /// Creates a dispatcher over `commands`.
    pub fn new(commands: Arc<CommandRegistry>, hooks: Hooks, stats: Arc<BotStats>) -> Self {
        Self {
            commands,
            hooks,
            stats,
        }
    }

    /// Registry this dispatcher routes into
    #[must_use]
    pub const fn commands(&self) -> &Arc<CommandRegistry> {
        &self.commands
    }

    /// Handles one interaction received over `client`.
    ///
    /// Only a failing pre-dispatch hook produces an `Err`; handler and reply
    /// failures are absorbed into [`DispatchOutcome::Failed`].
    pub async fn handle(
        &self,
        interaction: &dyn Interaction,
        client: &dyn BotClient,
    ) -> Result<DispatchOutcome> {
        self.hooks
            .run_interaction(interaction, client, &self.commands)
            .await?;

        if !interaction.is_chat_input_command() {
            return Ok(DispatchOutcome::Ignored);
        }
        let Some(name) = interaction.command_name() else {
            return Ok(DispatchOutcome::Ignored);
        };

        let Some(handler) = self.commands.get(name) else {
            debug!(command = %name, "Ignoring interaction for unknown command");
            return Ok(DispatchOutcome::UnknownCommand {
                name: name.to_string(),
            });
        };

        let ctx = CommandContext {
            interaction,
            commands: &self.commands,
        };
        match handler.execute(ctx).await {
            Ok(()) => {
                self.stats.record_command_executed();
                Ok(DispatchOutcome::Executed {
                    name: name.to_string(),
                })
            }
            Err(e) => {
                self.stats.record_command_failure();
                error!(
                    command = %name,
                    user = %interaction.user_tag(),
                    error = %e,
                    "Error in command"
                );
                let reply_delivered = self.send_failure_notice(interaction, name).await;
                Ok(DispatchOutcome::Failed {
                    name: name.to_string(),
                    reply_delivered,
                })
            }
        }
    }

    /// Best effort: the handler may already have replied, or the token expired.
    async fn send_failure_notice(&self, interaction: &dyn Interaction, name: &str) -> bool {
        let notice = Reply::default()
            .content(GENERIC_FAILURE_MESSAGE)
            .ephemeral(true);
        match interaction.reply(notice).await {
            Ok(()) => true,
            Err(e) => {
                self.stats.record_reply_failure();
                warn!(command = %name, error = %e, "Failed to send error message");
                false
            }
        }
    }
}
