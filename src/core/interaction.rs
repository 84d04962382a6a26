//! Framework-agnostic view of an inbound interaction and its reply channel.
//!
//! The dispatcher and command handlers only ever see [`Interaction`]; the bot layer
//! adapts serenity's interaction types to it, and tests substitute a fake.

use crate::errors::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// What kind of user action produced the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// A slash command typed in the chat input
    ChatInputCommand,
    /// A user or message context-menu command
    ContextMenuCommand,
    /// A button or select menu click
    Component,
    /// Autocomplete request for a command option
    Autocomplete,
    /// A submitted modal form
    ModalSubmit,
    /// Platform health check
    Ping,
}

/// One inbound request from the platform, borrowed for the length of a dispatch.
#[async_trait]
pub trait Interaction: Send + Sync {
    /// Kind tag of the interaction.
    fn kind(&self) -> InteractionKind;

    /// Invoked command name, for command interactions.
    fn command_name(&self) -> Option<&str>;

    /// When the platform created the interaction.
    fn created_at(&self) -> DateTime<Utc>;

    /// Display tag of the invoking user.
    fn user_tag(&self) -> &str;

    /// Avatar of the bot account answering the interaction.
    fn bot_avatar_url(&self) -> Option<String>;

    /// Most recent gateway heartbeat round trip, when one has been measured.
    async fn gateway_latency(&self) -> Option<Duration>;

    /// Sends the initial response. The platform accepts at most one.
    async fn reply(&self, reply: Reply) -> Result<()>;

    /// Replaces the content of the initial response.
    async fn edit_reply(&self, reply: Reply) -> Result<SentMessage>;

    /// Fetches the message created by the initial response.
    async fn fetch_reply(&self) -> Result<SentMessage>;

    /// True for slash command invocations, the only kind the dispatcher routes.
    fn is_chat_input_command(&self) -> bool {
        self.kind() == InteractionKind::ChatInputCommand
    }
}

/// A message the bot posted, as reported back by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Message id
    pub id: u64,
    /// When the platform created the message
    pub created_at: DateTime<Utc>,
}

/// Content of a response or an edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    /// Plain text body
    pub content: Option<String>,
    /// Rich embeds, rendered after the text
    pub embeds: Vec<Embed>,
    /// Only visible to the invoking user
    pub ephemeral: bool,
}

impl Reply {
    /// Sets the text body.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Appends an embed.
    #[must_use]
    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    /// Restricts visibility to the invoking user.
    #[must_use]
    pub const fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }
}

/// A rich message card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Embed {
    /// Accent colour as `0xRRGGBB`
    pub colour: Option<u32>,
    /// Card title
    pub title: Option<String>,
    /// Text under the title
    pub description: Option<String>,
    /// Name/value pairs in display order
    pub fields: Vec<EmbedField>,
    /// Footer line
    pub footer: Option<EmbedFooter>,
    /// Timestamp shown next to the footer
    pub timestamp: Option<DateTime<Utc>>,
}

/// One name/value pair of an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    /// Bold heading
    pub name: String,
    /// Body text
    pub value: String,
    /// Whether the field may share a row with its neighbours
    pub inline: bool,
}

/// Footer text with an optional icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedFooter {
    /// Footer text
    pub text: String,
    /// Icon shown next to the text
    pub icon_url: Option<String>,
}

impl Embed {
    /// Sets the accent colour.
    #[must_use]
    pub const fn colour(mut self, colour: u32) -> Self {
        self.colour = Some(colour);
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Sets the footer.
    #[must_use]
    pub fn footer(mut self, text: impl Into<String>, icon_url: Option<String>) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url,
        });
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
