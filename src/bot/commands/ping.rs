//! `/ping` - connectivity and latency check.

use crate::{
    core::{
        command::{CommandContext, CommandDefinition, CommandHandler},
        interaction::Reply,
    },
    errors::Result,
};
use async_trait::async_trait;
use tracing::info;

/// Replies, then edits the reply with round-trip and gateway latency.
pub struct Ping {
    definition: CommandDefinition,
}

impl Default for Ping {
    fn default() -> Self {
        Self {
            definition: CommandDefinition::new("ping", "Replies with Pong! and shows bot latency"),
        }
    }
}

#[async_trait]
impl CommandHandler for Ping {
    fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<()> {
        let interaction = ctx.interaction;
        info!("Ping command received from user: {}", interaction.user_tag());

        interaction
            .reply(Reply::default().content("Pinging..."))
            .await?;
        let sent = interaction.fetch_reply().await?;

        // Time between the user's interaction and our reply landing on the platform.
        let latency = (sent.created_at - interaction.created_at()).num_milliseconds();
        let api_latency = interaction
            .gateway_latency()
            .await
            .map_or_else(|| "n/a".to_string(), |d| format!("{}ms", d.as_millis()));

        interaction
            .edit_reply(Reply::default().content(format!(
                "Pong!\nBot Latency: {latency}ms\nAPI Latency: {api_latency}"
            )))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::registry::CommandRegistry, test_utils::FakeInteraction};
    use std::time::Duration;

    #[tokio::test]
    async fn test_ping_replies_then_edits_with_latency() {
        let registry = CommandRegistry::new();
        let interaction = FakeInteraction::command("ping").with_latency(Duration::from_millis(42));
        let ctx = CommandContext {
            interaction: &interaction,
            commands: &registry,
        };

        Ping::default().execute(ctx).await.unwrap();

        let replies = interaction.replies();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].content.as_deref(), Some("Pinging..."));

        let edits = interaction.edits();
        assert_eq!(edits.len(), 1);
        assert_eq!(
            edits[0].content.as_deref(),
            Some("Pong!\nBot Latency: 25ms\nAPI Latency: 42ms")
        );
    }

    #[tokio::test]
    async fn test_ping_without_heartbeat_reports_na() {
        let registry = CommandRegistry::new();
        let interaction = FakeInteraction::command("ping");
        let ctx = CommandContext {
            interaction: &interaction,
            commands: &registry,
        };

        Ping::default().execute(ctx).await.unwrap();

        let edits = interaction.edits();
        assert!(edits[0].content.as_deref().unwrap().ends_with("API Latency: n/a"));
    }

    #[tokio::test]
    async fn test_ping_propagates_reply_failure() {
        let registry = CommandRegistry::new();
        let interaction = FakeInteraction::command("ping").with_failing_replies();
        let ctx = CommandContext {
            interaction: &interaction,
            commands: &registry,
        };

        assert!(Ping::default().execute(ctx).await.is_err());
        assert!(interaction.edits().is_empty());
    }
}
