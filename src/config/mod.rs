/// Bot configuration from environment variables
pub mod environment;

pub use environment::BotConfig;
