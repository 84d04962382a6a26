//! Unified error types and result handling.

use thiserror::Error;

/// Every failure the bot can produce, from configuration to reply delivery.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration (environment, command definitions).
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// A command handler failed while executing.
    #[error("Command execution error: {message}")]
    Command {
        /// Failure reported by the handler
        message: String,
    },

    /// Command definitions could not be published to the platform.
    #[error("Command publish error: {message}")]
    Publish {
        /// Transport or authorization failure
        message: String,
    },

    /// A bootstrap hook rejected the event.
    #[error("Hook error: {message}")]
    Hook {
        /// Failure reported by the hook
        message: String,
    },

    /// A reply could not be delivered over the interaction's reply channel.
    #[error("Reply error: {message}")]
    Reply {
        /// Why the reply was refused
        message: String,
    },

    #[error("Environment variable error: {0}")]
    #[allow(missing_docs)]
    EnvVar(#[from] std::env::VarError),

    #[error("JSON error: {0}")]
    #[allow(missing_docs)]
    Json(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    #[allow(missing_docs)]
    Join(#[from] tokio::task::JoinError),

    /// Errors raised by serenity (HTTP, gateway, model).
    #[error("Serenity framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Shorthand used by command handlers to fail with a message.
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
        }
    }

    /// Shorthand used by hooks to reject an event.
    pub fn hook(message: impl Into<String>) -> Self {
        Self::Hook {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
