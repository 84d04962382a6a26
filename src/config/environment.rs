//! Bot configuration loaded from environment variables.
//!
//! Reads `BOT_TOKEN`, `CLIENT_ID` and the optional `GUILD_ID`. The `.env` file is
//! loaded by `main` before this runs, so values from either source end up here.

use crate::{
    core::publisher::PublishTarget,
    errors::{Error, Result},
};
use std::fmt;

/// Environment variable holding the bot's authentication token.
pub const TOKEN_VAR: &str = "BOT_TOKEN";
/// Environment variable holding the application (client) id.
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
/// Environment variable selecting guild-scoped command publication.
pub const GUILD_ID_VAR: &str = "GUILD_ID";

/// Everything the bootstrap needs to log in and publish commands.
#[derive(Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Authentication secret for the gateway and HTTP clients
    pub token: String,
    /// Application id commands are published under
    pub application_id: u64,
    /// When set, commands are published to this guild only
    pub guild_id: Option<u64>,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("application_id", &self.application_id)
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

impl BotConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// Empty values count as missing, so `GUILD_ID=` in a `.env` file falls back
    /// to global publication.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let token = read(TOKEN_VAR).ok_or_else(|| Error::Config {
            message: format!("{TOKEN_VAR} is not set"),
        })?;
        let application_id = read(CLIENT_ID_VAR)
            .ok_or_else(|| Error::Config {
                message: format!("{CLIENT_ID_VAR} is not set"),
            })
            .and_then(|raw| parse_id(CLIENT_ID_VAR, &raw))?;
        let guild_id = read(GUILD_ID_VAR)
            .map(|raw| parse_id(GUILD_ID_VAR, &raw))
            .transpose()?;

        Ok(Self {
            token,
            application_id,
            guild_id,
        })
    }

    /// Where command definitions should be published.
    #[must_use]
    pub const fn publish_target(&self) -> PublishTarget {
        match self.guild_id {
            Some(guild_id) => PublishTarget::Guild {
                application_id: self.application_id,
                guild_id,
            },
            None => PublishTarget::Global {
                application_id: self.application_id,
            },
        }
    }
}

fn parse_id(key: &str, raw: &str) -> Result<u64> {
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(Error::Config {
            message: format!("{key} must be a non-zero numeric id, got `{raw}`"),
        }),
        Ok(id) => Ok(id),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_loads_required_values() {
        let config =
            BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "secret"), ("CLIENT_ID", "42")]))
                .unwrap();

        assert_eq!(config.token, "secret");
        assert_eq!(config.application_id, 42);
        assert_eq!(config.guild_id, None);
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let result = BotConfig::from_lookup(lookup(&[("CLIENT_ID", "42")]));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_or_invalid_client_id() {
        let missing = BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "secret")]));
        assert!(matches!(missing, Err(Error::Config { .. })));

        let invalid = BotConfig::from_lookup(lookup(&[
            ("BOT_TOKEN", "secret"),
            ("CLIENT_ID", "not-a-number"),
        ]));
        assert!(matches!(invalid, Err(Error::Config { .. })));
    }

    #[test]
    fn test_empty_guild_id_means_global() {
        let config = BotConfig::from_lookup(lookup(&[
            ("BOT_TOKEN", "secret"),
            ("CLIENT_ID", "42"),
            ("GUILD_ID", "  "),
        ]))
        .unwrap();

        assert_eq!(
            config.publish_target(),
            PublishTarget::Global { application_id: 42 }
        );
    }

    #[test]
    fn test_guild_id_selects_guild_target() {
        let config = BotConfig::from_lookup(lookup(&[
            ("BOT_TOKEN", "secret"),
            ("CLIENT_ID", "42"),
            ("GUILD_ID", "1234"),
        ]))
        .unwrap();

        assert_eq!(
            config.publish_target(),
            PublishTarget::Guild {
                application_id: 42,
                guild_id: 1234
            }
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let config =
            BotConfig::from_lookup(lookup(&[("BOT_TOKEN", "secret"), ("CLIENT_ID", "42")]))
                .unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }
}
