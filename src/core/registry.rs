//! Command registry - maps command names to their handlers.
//!
//! Built once at startup from the explicit handler list and shared read-only
//! (`Arc<CommandRegistry>`) with the dispatcher, publisher and hooks afterwards.

use crate::{
    core::command::{CommandDefinition, CommandHandler},
    errors::{Error, Result},
};
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::{debug, warn};

/// Name-indexed collection of command handlers, iterated in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: Vec<Arc<dyn CommandHandler>>,
    index: HashMap<String, usize>,
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a statically assembled handler list.
    ///
    /// Later handlers win over earlier ones with the same name.
    pub fn from_handlers<I>(handlers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn CommandHandler>>,
    {
        let mut registry = Self::new();
        for handler in handlers {
            registry.register(handler)?;
        }
        Ok(registry)
    }

    /// Inserts a handler under its definition's name.
    ///
    /// A handler registered under an existing name replaces the previous one, keeps
    /// that entry's position in [`iter`](Self::iter), and is returned. Empty names are
    /// rejected.
    pub fn register(
        &mut self,
        handler: Arc<dyn CommandHandler>,
    ) -> Result<Option<Arc<dyn CommandHandler>>> {
        let name = handler.name().to_string();
        if name.trim().is_empty() {
            return Err(Error::Config {
                message: "command name must not be empty".to_string(),
            });
        }

        if let Some(&slot) = self.index.get(&name) {
            warn!(command = %name, "Command registered twice, replacing the earlier handler");
            let previous = std::mem::replace(&mut self.handlers[slot], handler);
            return Ok(Some(previous));
        }

        debug!(command = %name, "Registered command");
        self.index.insert(name, self.handlers.len());
        self.handlers.push(handler);
        Ok(None)
    }

    /// Looks up the handler for a command name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn CommandHandler>> {
        self.index.get(name).map(|&slot| &self.handlers[slot])
    }

    /// Iterates over all handlers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn CommandHandler>> + '_ {
        self.handlers.iter()
    }

    /// Iterates over all command definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &CommandDefinition> + '_ {
        self.handlers.iter().map(|handler| handler.definition())
    }

    /// Iterates over all command names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.iter().map(|handler| handler.name())
    }

    /// Number of registered commands
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when no command is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<'a> IntoIterator for &'a CommandRegistry {
    type Item = &'a Arc<dyn CommandHandler>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn CommandHandler>>;

    fn into_iter(self) -> Self::IntoIter {
        self.handlers.iter()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::RecordingHandler;

    #[test]
    fn test_get_returns_registered_handler() {
        let ping = RecordingHandler::new("ping");
        let registry =
            CommandRegistry::from_handlers([ping.clone() as Arc<dyn CommandHandler>]).unwrap();

        let found = registry.get("ping").unwrap();
        assert_eq!(found.name(), "ping");
        assert!(registry.get("pong").is_none());
    }

    #[test]
    fn test_last_registration_wins() {
        let first = RecordingHandler::with_description("ping", "first");
        let second = RecordingHandler::with_description("ping", "second");
        let mut registry = CommandRegistry::new();

        assert!(registry.register(first).unwrap().is_none());
        let replaced = registry.register(second).unwrap().unwrap();

        assert_eq!(replaced.definition().description(), "first");
        assert_eq!(registry.get("ping").unwrap().definition().description(), "second");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iteration_keeps_registration_order() {
        let mut registry = CommandRegistry::new();
        for name in ["ping", "help", "echo"] {
            registry.register(RecordingHandler::new(name)).unwrap();
        }
        // Overwriting keeps the original slot.
        registry
            .register(RecordingHandler::with_description("ping", "again"))
            .unwrap();

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["ping", "help", "echo"]);

        // Iteration is restartable.
        assert_eq!(registry.iter().count(), 3);
        assert_eq!((&registry).into_iter().count(), 3);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut registry = CommandRegistry::new();
        let result = registry.register(RecordingHandler::new("  "));

        assert!(matches!(result, Err(Error::Config { .. })));
        assert!(registry.is_empty());
    }
}
