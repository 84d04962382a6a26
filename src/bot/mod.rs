//! Bot layer - serenity client wiring, bundled commands and the bootstrap.
//!
//! [`start`] assembles the registry, publisher and dispatcher, subscribes them to
//! the gateway, and only then logs in.

/// Live client handed to hooks
pub mod client;
/// Bundled slash commands (help, ping)
pub mod commands;
/// Gateway event handler
pub mod handler;
/// serenity interaction adapter
pub mod interaction;
/// HTTP command publication
pub mod sink;

use crate::{
    config::BotConfig,
    core::{
        command::CommandHandler,
        dispatcher::Dispatcher,
        hooks::Hooks,
        publisher::Publisher,
        registry::CommandRegistry,
        stats::{BotStats, StatsSnapshot},
    },
    errors::{Error, Result},
};
use handler::Handler;
use poise::serenity_prelude as serenity;
use sink::HttpCommandSink;
use std::{
    future::Future,
    sync::{Arc, OnceLock},
};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

/// Gateway intents the bot subscribes to.
#[must_use]
pub fn intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
}

/// A running bot: its connection, registry and failure counters.
pub struct BotHandle {
    shard_manager: Arc<serenity::ShardManager>,
    commands: Arc<CommandRegistry>,
    stats: Arc<BotStats>,
    task: JoinHandle<Result<()>>,
}

impl BotHandle {
    /// Commands the bot answers
    #[must_use]
    pub const fn commands(&self) -> &Arc<CommandRegistry> {
        &self.commands
    }

    /// Current failure counters
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Closes every shard; [`wait`](Self::wait) returns afterwards.
    pub async fn shutdown(&self) {
        info!("Shutting down all shards");
        self.shard_manager.shutdown_all().await;
    }

    /// Runs until the client stops on its own or `signal` resolves, in which case
    /// every shard is shut down first. Returns the login or gateway error if any.
    pub async fn run_until(mut self, signal: impl Future<Output = ()>) -> Result<()> {
        let finished = tokio::select! {
            joined = &mut self.task => Some(joined),
            () = signal => None,
        };
        let joined = match finished {
            Some(joined) => joined,
            None => {
                self.shutdown().await;
                (&mut self.task).await
            }
        };
        info!(stats = ?self.stats(), "Bot stopped");
        joined?
    }
}

/// Builds and starts the bot.
///
/// Registry population and event subscriptions complete before login is issued,
/// since events can arrive as soon as the gateway accepts the session. Login runs
/// on a background task; its failure surfaces through [`BotHandle::run_until`].
#[instrument(skip_all, fields(application_id = config.application_id, guild_id = ?config.guild_id))]
pub async fn start(
    config: BotConfig,
    handlers: Vec<Arc<dyn CommandHandler>>,
    hooks: Hooks,
) -> Result<BotHandle> {
    let commands = Arc::new(CommandRegistry::from_handlers(handlers)?);
    info!(commands = ?commands, "Loaded commands");
    let stats = Arc::new(BotStats::default());

    let publish_http = Arc::new(serenity::Http::new(&config.token));
    let publisher = Publisher::new(
        config.publish_target(),
        Arc::new(HttpCommandSink::new(publish_http)),
        Arc::clone(&stats),
    );
    let dispatcher = Dispatcher::new(Arc::clone(&commands), hooks.clone(), Arc::clone(&stats));
    let shard_manager_slot = Arc::new(OnceLock::new());
    let handler = Handler::new(dispatcher, publisher, hooks, Arc::clone(&shard_manager_slot));

    info!("Setting up Serenity client...");
    let mut client = serenity::Client::builder(&config.token, intents())
        .event_handler(handler)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;
    // Fresh slot, cannot already be filled.
    let _ = shard_manager_slot.set(Arc::clone(&client.shard_manager));

    let shard_manager = Arc::clone(&client.shard_manager);

    info!("Starting bot client...");
    let task = tokio::spawn(async move {
        client
            .start()
            .await
            .inspect_err(|why| error!("Client error: {:?}", why))
            .map_err(Error::from)
    });

    Ok(BotHandle {
        shard_manager,
        commands,
        stats,
        task,
    })
}
