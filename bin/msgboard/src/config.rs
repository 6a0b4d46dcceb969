//! Runtime settings, read from `MSGBOARD_*` environment variables.

use config::{Config, ConfigError, Environment};
use mb_core::models::ListOrder;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub list_order: ListOrder,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix("MSGBOARD"))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_url", "sqlite:msgboard.db")?
            .set_default("max_connections", 5)?
            .set_default("acquire_timeout_secs", 5)?
            .set_default("list_order", "oldest-bumped-first")?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
