//! Gateway event handler - wires the ready and interaction events to the core.

use crate::{
    bot::{
        client::SerenityClient,
        interaction::{SerenityInteraction, ShardManagerSlot},
    },
    core::{
        client::BotClient,
        dispatcher::Dispatcher,
        hooks::{BotUser, Hooks, ReadySession},
        publisher::Publisher,
    },
};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing::{debug, error, info};

/// Subscribes the publisher, hooks and dispatcher to gateway events.
pub struct Handler {
    dispatcher: Dispatcher,
    publisher: Publisher,
    hooks: Hooks,
    shard_manager: ShardManagerSlot,
    ready_seen: AtomicBool,
}

impl Handler {
    /// Creates a handler; the shard manager slot is filled after the client is built.
    pub fn new(
        dispatcher: Dispatcher,
        publisher: Publisher,
        hooks: Hooks,
        shard_manager: ShardManagerSlot,
    ) -> Self {
        Self {
            dispatcher,
            publisher,
            hooks,
            shard_manager,
            ready_seen: AtomicBool::new(false),
        }
    }

    /// True exactly once, for the first ready event of the process.
    fn first_ready(&self) -> bool {
        !self.ready_seen.swap(true, Ordering::SeqCst)
    }

    /// Publishes commands and then runs the ready hook, on the first call only.
    ///
    /// Returns whether this call did the work. The hook runs even when
    /// publication fails; it sees the failure in [`ReadySession::publish`].
    pub async fn on_first_ready(
        &self,
        user: BotUser,
        guild_count: usize,
        client: Arc<dyn BotClient>,
    ) -> bool {
        if !self.first_ready() {
            return false;
        }
        info!(publish_target = %self.publisher.target(), "{} is online!", user.tag);

        let commands = Arc::clone(self.dispatcher.commands());
        let publish = self.publisher.publish(&commands).await;
        let session = ReadySession {
            client,
            user,
            guild_count,
            commands,
            publish,
        };
        self.hooks.run_ready(&session).await;
        true
    }
}

#[async_trait]
impl serenity::EventHandler for Handler {
    async fn ready(&self, ctx: serenity::Context, ready: serenity::Ready) {
        let user = BotUser {
            id: ready.user.id.get(),
            tag: ready.user.tag(),
            avatar_url: ready.user.avatar_url(),
        };
        let client = Arc::new(SerenityClient::new(ctx));
        if !self.on_first_ready(user, ready.guilds.len(), client).await {
            info!(session = %ready.session_id, "Gateway session resumed with a new ready event");
        }
    }

    async fn interaction_create(&self, ctx: serenity::Context, interaction: serenity::Interaction) {
        let client = SerenityClient::new(ctx.clone());
        let shard_manager = Arc::clone(&self.shard_manager);
        let interaction = SerenityInteraction::new(ctx, interaction, shard_manager);
        match self.dispatcher.handle(&interaction, &client).await {
            Ok(outcome) => debug!(?outcome, "Interaction handled"),
            Err(e) => error!(error = %e, "Interaction hook failed; event dropped"),
        }
    }
}
