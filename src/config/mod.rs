//! Configuration for Sentiscope.
//!
//! Every setting comes from the environment (after loading `.env` through
//! `dotenvy`). The resulting objects are built once in `main` and handed to
//! the components that need them.

mod classifier;
mod database;
pub(crate) mod helpers;
mod logging;
mod server;

pub use self::classifier::{
    ClassifierBackend, ClassifierConfig, DEFAULT_HF_BASE_URL, DEFAULT_SENTIMENT_MODEL,
};
pub use self::database::{DatabaseConfig, default_libsql_path, sentiscope_base_dir};
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::server::{DEFAULT_HISTORY_LIMIT, ServerConfig};

use crate::error::ConfigError;

/// Main configuration for the service.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub classifier: ClassifierConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            server: ServerConfig::resolve()?,
            database: DatabaseConfig::resolve()?,
            classifier: ClassifierConfig::resolve()?,
            logging: LoggingConfig::resolve()?,
        })
    }
}
