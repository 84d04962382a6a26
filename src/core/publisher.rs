//! Remote command publication.
//!
//! Pushes the registry's definitions to the platform so users see the commands.
//! Publication is a bulk overwrite, so publishing the same set twice is harmless.
//! Failures are logged and counted but never abort startup: the bot keeps serving
//! whatever commands the platform already knows about.

use crate::{
    core::{command::CommandSchema, registry::CommandRegistry, stats::BotStats},
    errors::Result,
};
use async_trait::async_trait;
use std::{fmt, sync::Arc};
use tracing::{error, info, instrument};

/// Where command definitions are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishTarget {
    /// Visible in every guild the bot is installed in
    Global {
        /// Owning application
        application_id: u64,
    },
    /// Visible in a single guild only; updates apply immediately
    Guild {
        /// Owning application
        application_id: u64,
        /// The guild commands are scoped to
        guild_id: u64,
    },
}

impl PublishTarget {
    /// Endpoint path the definitions are submitted to.
    #[must_use]
    pub fn route(&self) -> String {
        match self {
            Self::Global { application_id } => format!("applications/{application_id}/commands"),
            Self::Guild {
                application_id,
                guild_id,
            } => format!("applications/{application_id}/guilds/{guild_id}/commands"),
        }
    }

    /// Application the commands belong to
    #[must_use]
    pub const fn application_id(&self) -> u64 {
        match self {
            Self::Global { application_id } | Self::Guild { application_id, .. } => {
                *application_id
            }
        }
    }
}

impl fmt::Display for PublishTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global { .. } => write!(f, "global"),
            Self::Guild { guild_id, .. } => write!(f, "guild {guild_id}"),
        }
    }
}

/// Transport that replaces the platform's command list for a target.
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Overwrites the remote command list and returns how many commands the
    /// platform acknowledged.
    async fn put_commands(
        &self,
        target: PublishTarget,
        commands: &[CommandSchema<'_>],
    ) -> Result<usize>;
}

/// Result of one publication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The platform accepted the command list
    Published {
        /// Where the commands went
        target: PublishTarget,
        /// Commands acknowledged by the platform
        count: usize,
    },
    /// Publication failed; the error was logged
    Failed {
        /// Where the commands were meant to go
        target: PublishTarget,
        /// Rendered error
        error: String,
    },
}

impl PublishOutcome {
    /// True when the platform accepted the command list
    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Publishes registry contents to a fixed target through a [`CommandSink`].
pub struct Publisher {
    target: PublishTarget,
    sink: Arc<dyn CommandSink>,
    stats: Arc<BotStats>,
}

impl Publisher {
    /// Creates a publisher for `target`.
    pub fn new(target: PublishTarget, sink: Arc<dyn CommandSink>, stats: Arc<BotStats>) -> Self {
        Self {
            target,
            sink,
            stats,
        }
    }

    /// Target this publisher submits to
    #[must_use]
    pub const fn target(&self) -> PublishTarget {
        self.target
    }

    /// Submits every definition in `registry`, swallowing failures.
    #[instrument(skip_all, fields(target = %self.target, commands = registry.len()))]
    pub async fn publish(&self, registry: &CommandRegistry) -> PublishOutcome {
        let schemas: Vec<CommandSchema<'_>> = registry
            .definitions()
            .map(|definition| definition.schema())
            .collect();

        match self.sink.put_commands(self.target, &schemas).await {
            Ok(count) => {
                info!(count, route = %self.target.route(), "=== Commands registered! ===");
                PublishOutcome::Published {
                    target: self.target,
                    count,
                }
            }
            Err(e) => {
                self.stats.record_publish_failure();
                error!(
                    error = %e,
                    route = %self.target.route(),
                    "=== Error registering commands ==="
                );
                PublishOutcome::Failed {
                    target: self.target,
                    error: e.to_string(),
                }
            }
        }
    }
}
