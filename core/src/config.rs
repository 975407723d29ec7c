//! Environment-level configuration.
//!
//! The deployment keeps credentials and the store location in the
//! process environment; command-line flags on the runner override
//! whatever is set here.

use std::env;

const DEFAULT_DB_PATH: &str = "goldbook.db";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Chat-transport credential. Consumed by the transport layer, not
    /// by the relay itself.
    pub bot_token: Option<String>,
    /// Path of the sqlite store.
    pub db_path: String,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self {
            bot_token: env::var("BOT_TOKEN").ok(),
            db_path: env::var("GOLDBOOK_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            db_path: DEFAULT_DB_PATH.to_string(),
        }
    }
}
