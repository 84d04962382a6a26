//! Counters for failures the bot recovers from instead of propagating.
//!
//! Publish failures, handler failures and undeliverable replies are logged and
//! swallowed; these counters let an operator notice the bot degrading silently.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-lifetime counters shared by the publisher and dispatcher.
#[derive(Debug, Default)]
pub struct BotStats {
    commands_executed: AtomicU64,
    command_failures: AtomicU64,
    reply_failures: AtomicU64,
    publish_failures: AtomicU64,
}

/// Point-in-time copy of [`BotStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Handler invocations that completed successfully
    pub commands_executed: u64,
    /// Handler invocations that returned an error
    pub command_failures: u64,
    /// Generic failure notices that could not be delivered
    pub reply_failures: u64,
    /// Command publications that failed
    pub publish_failures: u64,
}

impl BotStats {
    pub(crate) fn record_command_executed(&self) {
        self.commands_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_command_failure(&self) {
        self.command_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_reply_failure(&self) {
        self.reply_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_publish_failure(&self) {
        self.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads all counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            commands_executed: self.commands_executed.load(Ordering::Relaxed),
            command_failures: self.command_failures.load(Ordering::Relaxed),
            reply_failures: self.reply_failures.load(Ordering::Relaxed),
            publish_failures: self.publish_failures.load(Ordering::Relaxed),
        }
    }
}
