//! Shared test utilities.
//!
//! Fakes for the seams the core talks through: interactions, the live client,
//! command handlers, hooks and command sinks.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        client::BotClient,
        command::{CommandContext, CommandDefinition, CommandHandler, CommandSchema},
        hooks::InteractionHook,
        interaction::{Interaction, InteractionKind, Reply, SentMessage},
        publisher::{CommandSink, PublishTarget},
        registry::CommandRegistry,
        utils::snowflake_timestamp,
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

/// Interaction id used by [`FakeInteraction`]; its snowflake time is the creation time.
pub const INTERACTION_ID: u64 = 175_928_847_299_117_063;

/// In-memory interaction that records everything sent over its reply channel.
pub struct FakeInteraction {
    kind: InteractionKind,
    command_name: Option<String>,
    fail_replies: bool,
    latency: Option<Duration>,
    reply_delay_ms: i64,
    replies: Mutex<Vec<Reply>>,
    edits: Mutex<Vec<Reply>>,
    reply_attempts: AtomicUsize,
}

impl FakeInteraction {
    /// A slash command invocation of `name`.
    pub fn command(name: &str) -> Self {
        Self::of_kind(InteractionKind::ChatInputCommand, Some(name))
    }

    /// Any interaction kind, optionally carrying a command name.
    pub fn of_kind(kind: InteractionKind, command_name: Option<&str>) -> Self {
        Self {
            kind,
            command_name: command_name.map(str::to_string),
            fail_replies: false,
            latency: None,
            reply_delay_ms: 25,
            replies: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
            reply_attempts: AtomicUsize::new(0),
        }
    }

    /// Every reply attempt fails, as if the token had expired.
    #[must_use]
    pub fn with_failing_replies(mut self) -> Self {
        self.fail_replies = true;
        self
    }

    /// Reports a gateway heartbeat latency.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Successfully delivered initial replies.
    pub fn replies(&self) -> Vec<Reply> {
        self.replies.lock().unwrap().clone()
    }

    /// Successfully applied edits.
    pub fn edits(&self) -> Vec<Reply> {
        self.edits.lock().unwrap().clone()
    }

    /// Initial reply attempts, successful or not.
    pub fn reply_attempts(&self) -> usize {
        self.reply_attempts.load(Ordering::SeqCst)
    }

    fn sent_message(&self) -> SentMessage {
        SentMessage {
            id: 1,
            created_at: self.created_at() + ChronoDuration::milliseconds(self.reply_delay_ms),
        }
    }
}

#[async_trait]
impl Interaction for FakeInteraction {
    fn kind(&self) -> InteractionKind {
        self.kind
    }

    fn command_name(&self) -> Option<&str> {
        self.command_name.as_deref()
    }

    fn created_at(&self) -> DateTime<Utc> {
        snowflake_timestamp(INTERACTION_ID)
    }

    fn user_tag(&self) -> &str {
        "tester"
    }

    fn bot_avatar_url(&self) -> Option<String> {
        Some("https://cdn.example/avatar.png".to_string())
    }

    async fn gateway_latency(&self) -> Option<Duration> {
        self.latency
    }

    async fn reply(&self, reply: Reply) -> Result<()> {
        self.reply_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_replies {
            return Err(Error::Reply {
                message: "interaction token expired".to_string(),
            });
        }
        let mut replies = self.replies.lock().unwrap();
        if !replies.is_empty() {
            return Err(Error::Reply {
                message: "interaction has already been acknowledged".to_string(),
            });
        }
        replies.push(reply);
        Ok(())
    }

    async fn edit_reply(&self, reply: Reply) -> Result<SentMessage> {
        if self.fail_replies || self.replies.lock().unwrap().is_empty() {
            return Err(Error::Reply {
                message: "unknown webhook".to_string(),
            });
        }
        self.edits.lock().unwrap().push(reply);
        Ok(self.sent_message())
    }

    async fn fetch_reply(&self) -> Result<SentMessage> {
        if self.replies.lock().unwrap().is_empty() {
            return Err(Error::Reply {
                message: "unknown message".to_string(),
            });
        }
        Ok(self.sent_message())
    }
}

/// Handler that counts its invocations.
pub struct RecordingHandler {
    definition: CommandDefinition,
    calls: AtomicUsize,
}

impl RecordingHandler {
    /// Handler named `name` with a placeholder description.
    pub fn new(name: &str) -> Arc<Self> {
        Self::with_description(name, "records calls")
    }

    /// Handler named `name` described as `description`.
    pub fn with_description(name: &str, description: &str) -> Arc<Self> {
        Arc::new(Self {
            definition: CommandDefinition::new(name, description),
            calls: AtomicUsize::new(0),
        })
    }

    /// Times [`CommandHandler::execute`] ran.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandHandler for RecordingHandler {
    fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    async fn execute(&self, _ctx: CommandContext<'_>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Handler that always fails.
pub struct FailingHandler {
    definition: CommandDefinition,
}

impl FailingHandler {
    /// Failing handler named `name`.
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            definition: CommandDefinition::new(name, "always fails"),
        })
    }
}

#[async_trait]
impl CommandHandler for FailingHandler {
    fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    async fn execute(&self, _ctx: CommandContext<'_>) -> Result<()> {
        Err(Error::command("handler exploded"))
    }
}

/// Handler that replies and then fails, leaving no room for a failure notice.
pub struct ReplyThenFailHandler {
    definition: CommandDefinition,
}

impl ReplyThenFailHandler {
    /// Reply-then-fail handler named `name`.
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            definition: CommandDefinition::new(name, "replies, then fails"),
        })
    }
}

#[async_trait]
impl CommandHandler for ReplyThenFailHandler {
    fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> Result<()> {
        ctx.interaction
            .reply(Reply::default().content("working on it"))
            .await?;
        Err(Error::command("failed after replying"))
    }
}

/// Pre-dispatch hook that records `(kind, registry size)` for every interaction.
#[derive(Default)]
pub struct RecordingHook {
    seen: Arc<Mutex<Vec<(InteractionKind, usize)>>>,
}

impl RecordingHook {
    /// Shared log of observed interactions; stays readable after the hook is moved.
    pub fn seen(&self) -> Arc<Mutex<Vec<(InteractionKind, usize)>>> {
        Arc::clone(&self.seen)
    }
}

#[async_trait]
impl InteractionHook for RecordingHook {
    async fn on_interaction(
        &self,
        interaction: &dyn Interaction,
        _client: &dyn BotClient,
        commands: &CommandRegistry,
    ) -> Result<()> {
        self.seen
            .lock()
            .unwrap()
            .push((interaction.kind(), commands.len()));
        Ok(())
    }
}

/// Pre-dispatch hook that rejects every interaction.
pub struct FailingHook;

#[async_trait]
impl InteractionHook for FailingHook {
    async fn on_interaction(
        &self,
        _interaction: &dyn Interaction,
        _client: &dyn BotClient,
        _commands: &CommandRegistry,
    ) -> Result<()> {
        Err(Error::hook("hook rejected the event"))
    }
}

/// Command sink that records every submission as JSON.
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<(PublishTarget, Vec<serde_json::Value>)>>,
}

impl RecordingSink {
    /// Every submission so far, in order.
    pub fn calls(&self) -> Vec<(PublishTarget, Vec<serde_json::Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandSink for RecordingSink {
    async fn put_commands(
        &self,
        target: PublishTarget,
        commands: &[CommandSchema<'_>],
    ) -> Result<usize> {
        let body = commands
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let count = body.len();
        self.calls.lock().unwrap().push((target, body));
        Ok(count)
    }
}

/// Command sink that always fails as if the bot lacked permissions.
pub struct FailingSink;

#[async_trait]
impl CommandSink for FailingSink {
    async fn put_commands(
        &self,
        _target: PublishTarget,
        _commands: &[CommandSchema<'_>],
    ) -> Result<usize> {
        Err(Error::Publish {
            message: "Missing Access".to_string(),
        })
    }
}

/// Live client that records presence changes and sent messages.
#[derive(Default)]
pub struct RecordingClient {
    activities: Mutex<Vec<Option<String>>>,
    messages: Mutex<Vec<(u64, String)>>,
}

impl RecordingClient {
    /// Every activity set so far, in order.
    pub fn activities(&self) -> Vec<Option<String>> {
        self.activities.lock().unwrap().clone()
    }

    /// Every `(channel id, content)` sent so far, in order.
    pub fn messages(&self) -> Vec<(u64, String)> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl BotClient for RecordingClient {
    fn set_activity(&self, activity: Option<&str>) {
        self.activities
            .lock()
            .unwrap()
            .push(activity.map(str::to_string));
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> Result<u64> {
        let mut messages = self.messages.lock().unwrap();
        messages.push((channel_id, content.to_string()));
        Ok(messages.len() as u64)
    }
}
