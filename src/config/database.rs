use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

use crate::config::helpers::optional_env;
use crate::error::ConfigError;

/// History database configuration (libSQL).
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the local libSQL database file (default: ~/.sentiscope/sentiscope.db).
    pub libsql_path: PathBuf,
    /// Turso cloud URL for remote sync (optional).
    pub libsql_url: Option<String>,
    /// Turso auth token (required when libsql_url is set).
    pub libsql_auth_token: Option<SecretString>,
}

impl DatabaseConfig {
    pub(crate) fn resolve() -> Result<Self, ConfigError> {
        let libsql_path = optional_env("LIBSQL_PATH")?
            .map(PathBuf::from)
            .unwrap_or_else(default_libsql_path);

        let libsql_url = optional_env("LIBSQL_URL")?;
        let libsql_auth_token = optional_env("LIBSQL_AUTH_TOKEN")?.map(SecretString::from);

        if libsql_url.is_some() && libsql_auth_token.is_none() {
            return Err(ConfigError::MissingRequired {
                key: "LIBSQL_AUTH_TOKEN".to_string(),
                hint: "LIBSQL_AUTH_TOKEN is required when LIBSQL_URL is set".to_string(),
            });
        }

        Ok(Self {
            libsql_path,
            libsql_url,
            libsql_auth_token,
        })
    }

    /// Get the Turso auth token (exposes the secret).
    pub fn auth_token(&self) -> Option<&str> {
        self.libsql_auth_token.as_ref().map(|t| t.expose_secret())
    }
}

/// Base directory for local state (~/.sentiscope).
pub fn sentiscope_base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sentiscope")
}

/// Default libSQL database path (~/.sentiscope/sentiscope.db).
pub fn default_libsql_path() -> PathBuf {
    sentiscope_base_dir().join("sentiscope.db")
}
