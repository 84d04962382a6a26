//! Bootstrap hooks - optional callbacks run at ready time and before every dispatch.
//!
//! Hooks let the embedding binary observe or extend the bot without touching the
//! dispatcher.

use crate::{
    core::{
        client::BotClient, interaction::Interaction, publisher::PublishOutcome,
        registry::CommandRegistry,
    },
    errors::Result,
};
use async_trait::async_trait;
use std::{fmt, sync::Arc};

/// The bot account as reported in the ready event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotUser {
    /// User id
    pub id: u64,
    /// Display tag (e.g. `name#0000` or the new-style username)
    pub tag: String,
    /// Avatar, when one is set
    pub avatar_url: Option<String>,
}

/// What the bot knows once it has connected and published its commands.
#[derive(Clone)]
pub struct ReadySession {
    /// The live connection, for presence updates and API calls
    pub client: Arc<dyn BotClient>,
    /// The logged-in bot account
    pub user: BotUser,
    /// Guilds visible in the ready payload
    pub guild_count: usize,
    /// Every command the bot answers
    pub commands: Arc<CommandRegistry>,
    /// Result of the startup publication
    pub publish: PublishOutcome,
}

impl fmt::Debug for ReadySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadySession")
            .field("user", &self.user)
            .field("guild_count", &self.guild_count)
            .field("commands", &self.commands)
            .field("publish", &self.publish)
            .finish_non_exhaustive()
    }
}

/// Runs once, after the first ready event and after commands are published.
#[async_trait]
pub trait ReadyHook: Send + Sync {
    /// Observes the live session.
    async fn on_ready(&self, session: &ReadySession);
}

/// Runs for every interaction before it is routed to a handler.
#[async_trait]
pub trait InteractionHook: Send + Sync {
    /// Observes the interaction. An error aborts the dispatch of this event.
    async fn on_interaction(
        &self,
        interaction: &dyn Interaction,
        client: &dyn BotClient,
        commands: &CommandRegistry,
    ) -> Result<()>;
}

/// The optional hooks handed to the bootstrap.
#[derive(Clone, Default)]
pub struct Hooks {
    on_ready: Option<Arc<dyn ReadyHook>>,
    on_interaction: Option<Arc<dyn InteractionHook>>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_ready", &self.on_ready.is_some())
            .field("on_interaction", &self.on_interaction.is_some())
            .finish()
    }
}

impl Hooks {
    /// No hooks configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ready hook.
    #[must_use]
    pub fn on_ready(mut self, hook: impl ReadyHook + 'static) -> Self {
        self.on_ready = Some(Arc::new(hook));
        self
    }

    /// Sets the pre-dispatch hook.
    #[must_use]
    pub fn on_interaction(mut self, hook: impl InteractionHook + 'static) -> Self {
        self.on_interaction = Some(Arc::new(hook));
        self
    }

    /// Invokes the ready hook, if any.
    pub async fn run_ready(&self, session: &ReadySession) {
        if let Some(hook) = &self.on_ready {
            hook.on_ready(session).await;
        }
    }

    /// Invokes the pre-dispatch hook, if any, returning its error unchanged.
    pub async fn run_interaction(
        &self,
        interaction: &dyn Interaction,
        client: &dyn BotClient,
        commands: &CommandRegistry,
    ) -> Result<()> {
        match &self.on_interaction {
            Some(hook) => hook.on_interaction(interaction, client, commands).await,
            None => Ok(()),
        }
    }
}
