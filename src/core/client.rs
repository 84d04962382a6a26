//! Live platform client handed to hooks.
//!
//! Hooks receive this instead of a concrete serenity `Context` so the core stays
//! testable; the `bot` layer implements it over the gateway connection.

use crate::errors::Result;
use async_trait::async_trait;

/// Actions a hook may take on the connected bot.
#[async_trait]
pub trait BotClient: Send + Sync {
    /// Sets the "Playing ..." status line, or clears it with `None`.
    fn set_activity(&self, activity: Option<&str>);

    /// Posts `content` to a channel and returns the new message id.
    async fn send_message(&self, channel_id: u64, content: &str) -> Result<u64>;
}
