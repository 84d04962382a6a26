//! Bundled slash commands.
//!
//! New commands implement [`CommandHandler`] and are added to [`all`]; there is no
//! directory scanning.

use crate::core::command::CommandHandler;
use std::sync::Arc;

/// Command listing
pub mod help;
/// Latency check
pub mod ping;

pub use help::Help;
pub use ping::Ping;

/// Every command shipped with the bot, in the order they are listed by `/help`.
#[must_use]
pub fn all() -> Vec<Arc<dyn CommandHandler>> {
    vec![Arc::new(Help::default()), Arc::new(Ping::default())]
}
