//! Command definitions and the handler capability every slash command implements.
//!
//! A command is a [`CommandDefinition`] (what gets published to the platform) plus an
//! `execute` method (what runs when a user invokes it). Both live behind the
//! [`CommandHandler`] trait so the registry can hold heterogeneous commands.

use crate::{
    core::{interaction::Interaction, registry::CommandRegistry},
    errors::Result,
};
use async_trait::async_trait;
use serde::Serialize;

/// Discord application command type for chat-input (slash) commands.
const CHAT_INPUT: u8 = 1;

/// Argument types a slash command option can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOptionType {
    /// Free text
    String,
    /// Whole number
    Integer,
    /// True or false
    Boolean,
    /// A guild member or user
    User,
    /// A channel
    Channel,
    /// A role
    Role,
    /// Floating point number
    Number,
}

impl From<CommandOptionType> for u8 {
    fn from(value: CommandOptionType) -> Self {
        match value {
            CommandOptionType::String => 3,
            CommandOptionType::Integer => 4,
            CommandOptionType::Boolean => 5,
            CommandOptionType::User => 6,
            CommandOptionType::Channel => 7,
            CommandOptionType::Role => 8,
            CommandOptionType::Number => 10,
        }
    }
}

impl Serialize for CommandOptionType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(u8::from(*self))
    }
}

/// One argument of a slash command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    kind: CommandOptionType,
    name: String,
    description: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    required: bool,
}

impl CommandOption {
    /// Creates an optional argument.
    pub fn new(
        kind: CommandOptionType,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required: false,
        }
    }

    /// Marks the argument as required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Argument name as shown to users
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Name, description and argument schema of a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    name: String,
    description: String,
    options: Vec<CommandOption>,
}

impl CommandDefinition {
    /// Starts a definition with no arguments.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Command name, unique within a registry
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Argument schema in declaration order
    #[must_use]
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    /// Borrows the definition in the shape the platform's command endpoint expects.
    #[must_use]
    pub fn schema(&self) -> CommandSchema<'_> {
        CommandSchema {
            kind: CHAT_INPUT,
            name: &self.name,
            description: &self.description,
            options: &self.options,
        }
    }
}

/// Wire representation of a [`CommandDefinition`].
#[derive(Debug, Serialize)]
pub struct CommandSchema<'a> {
    #[serde(rename = "type")]
    kind: u8,
    name: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "no_options")]
    options: &'a [CommandOption],
}

fn no_options(options: &&[CommandOption]) -> bool {
    options.is_empty()
}

/// What a handler gets to work with for one invocation.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    /// The interaction being answered; also the reply channel
    pub interaction: &'a dyn Interaction,
    /// Every command the bot knows about
    pub commands: &'a CommandRegistry,
}

/// A slash command: its published definition plus the code that answers it.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// The definition published to the platform and used for routing.
    fn definition(&self) -> &CommandDefinition;

    /// Answers one invocation of the command.
    async fn execute(&self, ctx: CommandContext<'_>) -> Result<()>;

    /// Shortcut for `definition().name()`.
    fn name(&self) -> &str {
        self.definition().name()
    }
}
