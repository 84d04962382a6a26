use async_trait::async_trait;
use discord_starter::{
    BotConfig, Result,
    bot::{self, commands},
    core::{
        client::BotClient,
        hooks::{Hooks, InteractionHook, ReadyHook, ReadySession},
        interaction::Interaction,
        registry::CommandRegistry,
    },
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Announces that the bot is serving commands and points users at `/help`.
struct AnnounceReady;

#[async_trait]
impl ReadyHook for AnnounceReady {
    async fn on_ready(&self, session: &ReadySession) {
        session.client.set_activity(Some("/help"));
        info!(
            guilds = session.guild_count,
            commands = session.commands.len(),
            published = session.publish.is_published(),
            "=== Bot is up and running! ==="
        );
    }
}

/// Logs every slash command before it is dispatched.
struct LogCommands;

#[async_trait]
impl InteractionHook for LogCommands {
    async fn on_interaction(
        &self,
        interaction: &dyn Interaction,
        _client: &dyn BotClient,
        _commands: &CommandRegistry,
    ) -> Result<()> {
        let command = interaction
            .command_name()
            .filter(|_| interaction.is_chat_input_command());
        if let Some(name) = command {
            info!(user = %interaction.user_tag(), "Received command: {}", name);
        }
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also come from the real environment
    dotenv().ok();

    // 3. Configuration errors are fatal before login
    let config = BotConfig::from_env()
        .inspect_err(|e| error!("Critical error loading bot configuration: {}", e))?;
    info!(?config, "Loaded bot configuration");

    let hooks = Hooks::new().on_ready(AnnounceReady).on_interaction(LogCommands);
    let handle = bot::start(config, commands::all(), hooks).await?;

    handle.run_until(shutdown_signal()).await
}

/// Resolves on Ctrl-C. If the signal handler cannot be installed the bot runs
/// until the gateway connection ends.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            error!(error = %e, "Unable to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}
